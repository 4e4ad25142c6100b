use std::{fmt, sync::Arc};

use tokio::sync::Mutex;

use session::{InputUpdate, SessionStore};
use sizer::sizing::{MIN_CAPITAL, MIN_MARGIN_PER_CONTRACT, MIN_PRICE};
use sizer::{compute, Instrument, RiskPercent, Sizing, SizingInputs, MICRO_NASDAQ};

pub const DEGENERATE_WARNING: &str =
    "stop distance is zero or the entry price is degenerate; nothing to size";
pub const NOT_VIABLE_ADVISORY: &str =
    "entry not viable: the stop loss on one contract exceeds the allowed risk amount";

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub struct InputsRequest {
    pub capital: Option<f64>,
    pub entry_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub risk_percent: Option<u8>,
    pub margin_per_contract: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct InputsResponse {
    pub capital: f64,
    pub entry_price: f64,
    pub stop_price: f64,
    pub risk_percent: u8,
    pub margin_per_contract: f64,
}

impl From<SizingInputs> for InputsResponse {
    fn from(inputs: SizingInputs) -> Self {
        Self {
            capital: inputs.capital,
            entry_price: inputs.entry_price,
            stop_price: inputs.stop_price,
            risk_percent: inputs.risk_percent.as_whole_percent(),
            margin_per_contract: inputs.margin_per_contract,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SizingResponse {
    Degenerate {
        warning: String,
    },
    Sized {
        point_diff: f64,
        stop_percent: f64,
        risk_amount: f64,
        loss_per_contract: f64,
        max_contracts: u64,
        position_value: f64,
        leverage: f64,
        used_margin: f64,
        margin_leverage: f64,
        viable: bool,
        advisory: Option<String>,
    },
}

impl From<Sizing> for SizingResponse {
    fn from(sizing: Sizing) -> Self {
        match sizing {
            Sizing::Degenerate => Self::Degenerate {
                warning: DEGENERATE_WARNING.to_owned(),
            },
            Sizing::Sized(size) => Self::Sized {
                point_diff: size.point_diff,
                stop_percent: size.stop_percent,
                risk_amount: size.risk_amount,
                loss_per_contract: size.loss_per_contract,
                max_contracts: size.max_contracts,
                position_value: size.position_value,
                leverage: size.leverage,
                used_margin: size.used_margin,
                margin_leverage: size.margin_leverage,
                viable: size.is_viable(),
                advisory: if size.is_viable() {
                    None
                } else {
                    Some(NOT_VIABLE_ADVISORY.to_owned())
                },
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluationResponse {
    pub inputs: InputsResponse,
    pub sizing: SizingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    NonFiniteCapital,
    NonFiniteEntryPrice,
    NonFiniteStopPrice,
    NonFiniteMarginPerContract,
    InvalidRiskPercent,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteCapital => write!(f, "capital must be a finite number"),
            Self::NonFiniteEntryPrice => write!(f, "entry_price must be a finite number"),
            Self::NonFiniteStopPrice => write!(f, "stop_price must be a finite number"),
            Self::NonFiniteMarginPerContract => {
                write!(f, "margin_per_contract must be a finite number")
            }
            Self::InvalidRiskPercent => {
                write!(f, "risk_percent must be one of: 1, 2, 3, 4, 5")
            }
        }
    }
}

impl std::error::Error for InputError {}

impl InputsRequest {
    // The input boundary: reject non-finite numbers and out-of-set risk
    // choices, clamp everything else to its documented floor.
    pub fn into_update(self) -> Result<InputUpdate, InputError> {
        let capital = clamp_field(self.capital, MIN_CAPITAL, InputError::NonFiniteCapital)?;
        let entry_price = clamp_field(self.entry_price, MIN_PRICE, InputError::NonFiniteEntryPrice)?;
        let stop_price = clamp_field(self.stop_price, MIN_PRICE, InputError::NonFiniteStopPrice)?;
        let margin_per_contract = clamp_field(
            self.margin_per_contract,
            MIN_MARGIN_PER_CONTRACT,
            InputError::NonFiniteMarginPerContract,
        )?;
        let risk_percent = match self.risk_percent {
            Some(percent) => Some(
                RiskPercent::from_whole_percent(percent).ok_or(InputError::InvalidRiskPercent)?,
            ),
            None => None,
        };

        Ok(InputUpdate {
            capital,
            entry_price,
            stop_price,
            risk_percent,
            margin_per_contract,
        })
    }
}

fn clamp_field(
    value: Option<f64>,
    floor: f64,
    non_finite_error: InputError,
) -> Result<Option<f64>, InputError> {
    match value {
        Some(value) if !value.is_finite() => Err(non_finite_error),
        Some(value) => Ok(Some(value.max(floor))),
        None => Ok(None),
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    store: Arc<Mutex<SessionStore>>,
    instrument: Instrument,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: Arc::new(Mutex::new(SessionStore::new())),
            instrument: MICRO_NASDAQ,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn inputs(&self, session_key: &str) -> InputsResponse {
        let mut store = self.store.lock().await;
        store.inputs(session_key).into()
    }

    // Results are re-derived on every read; nothing is cached.
    pub async fn evaluate(&self, session_key: &str) -> EvaluationResponse {
        let mut store = self.store.lock().await;
        let inputs = store.inputs(session_key);
        self.evaluation(inputs)
    }

    pub async fn apply_update(
        &self,
        session_key: &str,
        request: InputsRequest,
    ) -> Result<EvaluationResponse, InputError> {
        let update = request.into_update()?;
        let mut store = self.store.lock().await;
        let inputs = store.update(session_key, update);
        Ok(self.evaluation(inputs))
    }

    fn evaluation(&self, inputs: SizingInputs) -> EvaluationResponse {
        EvaluationResponse {
            inputs: inputs.into(),
            sizing: compute(inputs, self.instrument).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppState, InputError, InputsRequest, SizingResponse, DEGENERATE_WARNING,
        NOT_VIABLE_ADVISORY,
    };

    #[tokio::test]
    async fn first_read_returns_the_documented_defaults() {
        let state = AppState::new();

        let inputs = state.inputs("default").await;

        assert_eq!(inputs.capital, 50_000.0);
        assert_eq!(inputs.entry_price, 19_000.0);
        assert_eq!(inputs.stop_price, 18_900.0);
        assert_eq!(inputs.risk_percent, 5);
        assert_eq!(inputs.margin_per_contract, 1_500.0);
    }

    #[tokio::test]
    async fn evaluate_sizes_the_default_session() {
        let state = AppState::new();

        let evaluation = state.evaluate("default").await;

        match evaluation.sizing {
            SizingResponse::Sized {
                max_contracts,
                leverage,
                viable,
                advisory,
                ..
            } => {
                assert_eq!(max_contracts, 12);
                assert_eq!(leverage, 9.12);
                assert!(viable);
                assert_eq!(advisory, None);
            }
            SizingResponse::Degenerate { .. } => panic!("defaults must produce a sized result"),
        }
    }

    #[tokio::test]
    async fn update_persists_between_calls() {
        let state = AppState::new();
        state
            .apply_update(
                "default",
                InputsRequest {
                    capital: Some(25_000.0),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap();

        let inputs = state.inputs("default").await;

        assert_eq!(inputs.capital, 25_000.0);
    }

    #[tokio::test]
    async fn equal_entry_and_stop_reports_a_degenerate_warning() {
        let state = AppState::new();

        let evaluation = state
            .apply_update(
                "default",
                InputsRequest {
                    stop_price: Some(19_000.0),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            evaluation.sizing,
            SizingResponse::Degenerate {
                warning: DEGENERATE_WARNING.to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn zero_contract_result_carries_the_not_viable_advisory() {
        let state = AppState::new();

        let evaluation = state
            .apply_update(
                "default",
                InputsRequest {
                    capital: Some(1_000.0),
                    risk_percent: Some(1),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap();

        match evaluation.sizing {
            SizingResponse::Sized {
                max_contracts,
                viable,
                advisory,
                ..
            } => {
                assert_eq!(max_contracts, 0);
                assert!(!viable);
                assert_eq!(advisory.as_deref(), Some(NOT_VIABLE_ADVISORY));
            }
            SizingResponse::Degenerate { .. } => panic!("a zero-contract result is not degenerate"),
        }
    }

    #[tokio::test]
    async fn boundary_clamps_fields_to_their_floors() {
        let state = AppState::new();

        let evaluation = state
            .apply_update(
                "default",
                InputsRequest {
                    capital: Some(1.0),
                    margin_per_contract: Some(1.0),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(evaluation.inputs.capital, 1_000.0);
        assert_eq!(evaluation.inputs.margin_per_contract, 500.0);
    }

    #[tokio::test]
    async fn rejects_risk_percent_outside_the_permitted_set() {
        let state = AppState::new();

        let err = state
            .apply_update(
                "default",
                InputsRequest {
                    risk_percent: Some(6),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, InputError::InvalidRiskPercent);
    }

    #[tokio::test]
    async fn rejects_non_finite_capital() {
        let state = AppState::new();

        let err = state
            .apply_update(
                "default",
                InputsRequest {
                    capital: Some(f64::NAN),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, InputError::NonFiniteCapital);
    }

    #[tokio::test]
    async fn rejected_update_leaves_the_session_untouched() {
        let state = AppState::new();

        let result = state
            .apply_update(
                "default",
                InputsRequest {
                    capital: Some(f64::INFINITY),
                    ..InputsRequest::default()
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(state.inputs("default").await.capital, 50_000.0);
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_key() {
        let state = AppState::new();
        state
            .apply_update(
                "alpha",
                InputsRequest {
                    capital: Some(10_000.0),
                    ..InputsRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(state.inputs("beta").await.capital, 50_000.0);
        assert_eq!(state.inputs("alpha").await.capital, 10_000.0);
    }
}
