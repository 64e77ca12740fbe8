//! What a message producer may return.

use std::borrow::Cow;

/// Conversion from a producer's return value into the rendered message.
///
/// `None` means "nothing to log": the dispatcher abandons the call without building a record.
pub trait IntoMessage {
    fn into_message(self) -> Option<String>;
}

impl IntoMessage for String {
    fn into_message(self) -> Option<String> {
        Some(self)
    }
}

impl IntoMessage for &str {
    fn into_message(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoMessage for Cow<'_, str> {
    fn into_message(self) -> Option<String> {
        Some(self.into_owned())
    }
}

/// Logs an empty message; only the record's metadata is rendered.
impl IntoMessage for () {
    fn into_message(self) -> Option<String> {
        Some(String::new())
    }
}

impl<T: IntoMessage> IntoMessage for Option<T> {
    fn into_message(self) -> Option<String> {
        self.and_then(IntoMessage::into_message)
    }
}
