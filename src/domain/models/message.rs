#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author,
            text: text.replace('\t', "  "),
        };
    }

    /// Backend answers mark emphasis with `**`, which has no meaning in a
    /// terminal.
    pub fn plain_text(&self) -> String {
        return self.text.replace("**", "");
    }
}
