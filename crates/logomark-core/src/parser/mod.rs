pub mod classifier;
pub mod legacy;
pub mod normalize;
pub mod resolver;
pub mod tokenizer;
pub mod tokens;
pub mod validator;

pub use classifier::{Classification, Classifier};
pub use legacy::{NormalizedToken, rewrite_legacy};
pub use normalize::Normalizer;
pub use resolver::{PrefixMatch, resolve_prefix};
pub use tokenizer::{Token, Tokenizer};
pub use tokens::{TokenFindings, classify_tokens};
pub use validator::validate;
