//! Technical indicators over undefined-aware series.
//!
//! This crate provides the calculations behind the indicator engine:
//! - Moving averages (SMA, EMA, streaming EMA)
//! - Momentum indicators (RSI, MACD, Stochastic %K/%D, Stochastic RSI)
//! - Rank Correlation Index (RCI)
//! - Lag and difference transforms
//!
//! Every calculation returns a series aligned row-for-row with its input.
//! Rows without enough history, or whose window touches an undefined cell,
//! are `None`.

pub mod momentum;
pub mod moving_average;
pub mod rank;
pub mod simd;
pub mod transform;

pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{Ema, Sma, StreamingEma};
pub use rank::Rci;
pub use transform::{diff, Shift};
