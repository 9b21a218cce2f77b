use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Author {
    #[strum(serialize = "You")]
    User,
    #[strum(serialize = "Vault")]
    Assistant,
    System,
}
