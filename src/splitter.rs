//! Zero-copy message splitter with a reusable offset buffer.
//!
//! `Splitter::split` walks the message once, recording the position after
//! each delimiter hit into an index buffer that is reused across calls, so
//! steady-state splitting allocates nothing. Delimiters alternate between
//! the two bytes supplied, which matches key/value wire formats like
//! `t=1638848595|i=VOD.L|...` where `=` and `|` take turns.
//!
//! The returned [`Fields`] view borrows both the splitter and the message;
//! field text is sliced straight out of the input.

/// Reusable split state. One instance per decoding thread.
#[derive(Clone, Debug, Default)]
pub struct Splitter {
    ix: Vec<usize>,
}

impl Splitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the offset buffer for messages with up to `fields` fields.
    pub fn with_capacity(fields: usize) -> Self {
        Self {
            ix: Vec::with_capacity(fields + 2),
        }
    }

    /// Splits `msg` on the two alternating delimiter bytes.
    ///
    /// The first delimiter searched for is `delims[1]`, then `delims[0]`,
    /// and so on. A trailing delimiter does not produce an empty field.
    pub fn split<'s, 'm>(&'s mut self, msg: &'m str, delims: [u8; 2]) -> Fields<'s, 'm> {
        let bytes = msg.as_bytes();
        self.ix.clear();
        self.ix.push(0);

        let mut from = 0;
        loop {
            let d = delims[self.ix.len() & 1];
            match bytes[from..].iter().position(|&b| b == d) {
                Some(rel) => {
                    from += rel + 1;
                    self.ix.push(from);
                }
                None => {
                    if from != bytes.len() {
                        self.ix.push(bytes.len() + 1);
                    }
                    break;
                }
            }
        }

        Fields { ix: &self.ix, msg }
    }
}

/// Borrowed view over the fields of one split message.
#[derive(Clone, Copy, Debug)]
pub struct Fields<'s, 'm> {
    ix: &'s [usize],
    msg: &'m str,
}

impl<'m> Fields<'_, 'm> {
    /// Number of fields found.
    #[inline]
    pub fn field_ct(&self) -> usize {
        self.ix.len() - 1
    }

    /// Text of field `i`, or `None` past the end.
    #[inline]
    pub fn sequence(&self, i: usize) -> Option<&'m str> {
        let start = *self.ix.get(i)?;
        let end = *self.ix.get(i + 1)?;
        Some(&self.msg[start..end - 1])
    }

    /// Field `i` parsed as a signed integer.
    pub fn to_long(&self, i: usize) -> Option<i64> {
        self.sequence(i)?.parse().ok()
    }

    /// First character of field `i`.
    pub fn to_char(&self, i: usize) -> Option<char> {
        self.sequence(i)?.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIMS: [u8; 2] = [b'|', b'='];

    #[test]
    fn splits_key_value_message() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("t=1638848595|i=VOD.L|p=32.99|q=100.25|s=b", DELIMS);

        assert_eq!(fields.field_ct(), 10);
        assert_eq!(fields.sequence(0), Some("t"));
        assert_eq!(fields.sequence(1), Some("1638848595"));
        assert_eq!(fields.sequence(2), Some("i"));
        assert_eq!(fields.sequence(3), Some("VOD.L"));
        assert_eq!(fields.sequence(5), Some("32.99"));
        assert_eq!(fields.sequence(7), Some("100.25"));
        assert_eq!(fields.sequence(9), Some("b"));
    }

    #[test]
    fn sequence_past_end_is_none() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("t=1|i=A|p=1.00|q=2.00|s=a", DELIMS);

        assert_eq!(fields.field_ct(), 10);
        assert_eq!(fields.sequence(10), None);
    }

    #[test]
    fn no_delimiter_yields_whole_message() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("hello", DELIMS);

        assert_eq!(fields.field_ct(), 1);
        assert_eq!(fields.sequence(0), Some("hello"));
    }

    #[test]
    fn trailing_delimiter_drops_empty_field() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("t=", DELIMS);

        assert_eq!(fields.field_ct(), 1);
        assert_eq!(fields.sequence(0), Some("t"));
    }

    #[test]
    fn empty_message_has_no_fields() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("", DELIMS);

        assert_eq!(fields.field_ct(), 0);
        assert_eq!(fields.sequence(0), None);
    }

    #[test]
    fn buffer_is_reused_without_leaking_previous_fields() {
        let mut splitter = Splitter::new();
        {
            let long = splitter.split("t=1638848595|i=VOD.L|p=32.99|q=100.25|s=b", DELIMS);
            assert_eq!(long.field_ct(), 10);
        }
        let short = splitter.split("t=9|s=c", DELIMS);

        assert_eq!(short.field_ct(), 4);
        assert_eq!(short.sequence(1), Some("9"));
        assert_eq!(short.sequence(3), Some("c"));
        assert_eq!(short.sequence(4), None);
    }

    #[test]
    fn numeric_helpers() {
        let mut splitter = Splitter::new();
        let fields = splitter.split("t=42|s=b", DELIMS);

        assert_eq!(fields.to_long(1), Some(42));
        assert_eq!(fields.to_char(3), Some('b'));
        assert_eq!(fields.to_long(0), None);
    }
}
