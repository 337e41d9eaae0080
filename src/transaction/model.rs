use serde::{Deserialize, Serialize};
use serde_json::Number;

/// An opaque transfer record. Amounts are carried as the JSON number they
/// arrived as; there is no balance or double-spend checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn wire_form_has_three_fields() {
        let tx = Transaction::new("A", "B", 5);
        let value = serde_json::to_value(&tx).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["sender"], "A");
        assert_eq!(obj["recipient"], "B");
        assert_eq!(obj["amount"], 5);
    }

    #[test]
    fn amounts_keep_their_json_form() {
        let big: Transaction =
            serde_json::from_str(r#"{"sender":"A","recipient":"B","amount":9007199254740993}"#)
                .unwrap();
        assert_eq!(big.amount.as_u64(), Some(9_007_199_254_740_993));

        let frac: Transaction =
            serde_json::from_str(r#"{"sender":"A","recipient":"B","amount":2.5}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&frac).unwrap(),
            r#"{"sender":"A","recipient":"B","amount":2.5}"#
        );
    }
}
