use crate::decoder::DotenvDecoder;
use crate::types::DecodeOptions;

/// Builder for a configured [`DotenvDecoder`].
///
/// ```
/// let decoder = dotfig::DotenvDecoder::builder()
///     .prefix("MYAPP")
///     .max_sequence_len(64)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct DotenvDecoderBuilder {
    prefix: Option<String>,
    max_sequence_len: Option<usize>,
}

impl DotenvDecoderBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Only decode keys that start with `{prefix}_`, stripping the prefix and
    /// its delimiter before resolution. The prefix is matched without regard
    /// to ASCII case. Other keys are ignored.
    ///
    /// With prefix `MYAPP`, `MYAPP_DATABASE_HOST` is resolved as
    /// `DATABASE_HOST`. An empty prefix is the same as no prefix.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string()).filter(|p| !p.is_empty());
        self
    }

    /// Reject sequence indices at or above `len` instead of growing the
    /// sequence to reach them (default: unbounded).
    pub fn max_sequence_len(mut self, len: usize) -> Self {
        self.max_sequence_len = Some(len);
        self
    }

    pub fn build(self) -> DotenvDecoder {
        DotenvDecoder::with_options(DecodeOptions {
            prefix: self.prefix,
            max_sequence_len: self.max_sequence_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_options() {
        let decoder = DotenvDecoderBuilder::new().build();
        assert_eq!(decoder.options(), &DecodeOptions::default());
    }

    #[test]
    fn records_prefix_and_limit() {
        let decoder = DotenvDecoderBuilder::new()
            .prefix("MYAPP")
            .max_sequence_len(8)
            .build();
        assert_eq!(decoder.options().prefix.as_deref(), Some("MYAPP"));
        assert_eq!(decoder.options().max_sequence_len, Some(8));
    }

    #[test]
    fn empty_prefix_is_no_prefix() {
        let decoder = DotenvDecoderBuilder::new().prefix("").build();
        assert_eq!(decoder.options().prefix, None);
    }

    #[test]
    fn later_calls_override_earlier() {
        let decoder = DotenvDecoderBuilder::new()
            .prefix("A")
            .prefix("B")
            .build();
        assert_eq!(decoder.options().prefix.as_deref(), Some("B"));
    }
}
