//! A tiny interpreter for a transport-fleet command language.
//!
//! Planes, trains and trucks are built from `ADD` lines, removed in bulk by `REM`
//! conditions and listed by `PRINT`, all against one in-memory [`Container`].
//!
//! The main entry point is [`Interpreter`], which executes lines one by one using
//! a set of pluggable command factories. The public modules [`transport`],
//! [`factory`] and [`container`] expose the data model for use without the
//! command language.

mod builtin;
pub mod command;
pub mod config;
pub mod container;
pub mod env;
pub mod error;
pub mod factory;
mod interpreter;
pub mod logging;
pub mod transport;

/// Just a convenient re-export of the line interpreter.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, RunSummary};

pub use config::Config;
pub use container::{Condition, Container, Number, Operator};
pub use error::{CommandError, TransportError};
pub use factory::{Params, TransportRegistry};
pub use transport::{FieldValue, Plane, Train, Transport, Truck};
