pub mod health;
pub use self::health::health;

pub mod send_message;
pub use self::send_message::send_message;

pub mod recv_message;
pub use self::recv_message::recv_message;

// common functions for the handlers
use regex::Regex;

/// A recipient id is digits only, no sign, no decimal point.
pub fn valid_number(number: &str) -> bool {
    Regex::new(r"^[0-9]+$").map_or(false, |re| re.is_match(number))
}
