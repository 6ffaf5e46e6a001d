//! Feature encoding for learned policies. Training and inference live
//! outside this crate; a trained model plugs in through `planners::Policy`.

mod encoder;

pub use encoder::{
    ACTION_SLOTS, AgentFeatures, CHANNELS, EncoderConfig, StateEncoder, VECTOR_FEATURES,
    infer_previous_commands,
};
