pub mod digest_flow;

pub use digest_flow::{DigestFlow, RunOutcome};
