static INTERNATIONAL_PREFIX: &str = "+64";
static LOCAL_PREFIX: &str = "0";

// Converts an international New Zealand number into the local format the
// dispatch api expects, ie "+64221234567" -> "0221234567".  Anything else is
// passed through untouched, there's no attempt to validate the number.
pub fn normalize(phone: &str) -> String {
    match phone.strip_prefix(INTERNATIONAL_PREFIX) {
        Some(rest) => format!("{}{}", LOCAL_PREFIX, rest),
        None => phone.to_string(),
    }
}
