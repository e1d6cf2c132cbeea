//! Keystroke-level editing assists built on the lexical model.

pub mod activation;
pub mod autopair;
pub mod indent;

pub use activation::{Activation, ActivationKind, ActivationSequenceMatcher};
pub use autopair::{AutoPairs, PairAction};
pub use indent::indent_for;
