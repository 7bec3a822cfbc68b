//! Two-party secure comparison of private integers.
//!
//! Alice holds a Paillier key pair and an input `a`, Bob holds the public
//! key and an input `b`. After four messages Bob learns `[a R b]` for the
//! agreed relation `R` and neither party learns the other's input.

pub mod compare;
pub mod garble;
pub mod ot;

pub use compare::{
    compare_local, run_alice, run_bob, Alice, AliceGarbling, AliceSetup, BlindedInput, Bob,
    BobChoice, CompareError, ProtocolParams,
};
pub use garble::{
    encode, EvaluatorError, GCEvaluator, GCGenerator, GarbledCircuit, GeneratorError,
    HalfGateEvaluator, HalfGateGenerator, TranslationTable, WireKeyPair,
};
pub use ot::{
    OTReceiverError, OTSenderError, OtReceiver, OtReceiverState, OtSender, OtSenderState,
    TedOtReceiver, TedOtSender,
};
