use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

/// One step from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(SmolStr),
    Index(usize),
    Key(SmolStr),
}

/// Location of an error relative to the value handed to the top-level parse.
///
/// Paths are built bottom-up: a child reports errors relative to itself and
/// every call boundary on the way out prepends its own segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }
}

impl From<PathSegment> for FieldPath {
    fn from(segment: PathSegment) -> Self {
        let mut segments = SmallVec::new();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => {
                    let mut buffer = itoa::Buffer::new();
                    write!(f, "[{}]", buffer.format(*index))?;
                }
                PathSegment::Key(key) => write!(f, "[{:?}]", key.as_str())?,
            }
        }
        Ok(())
    }
}

/// Failure to build a `Literal` from runtime data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("Literal does not support string '{value}'. The following strings are supported: {allowed}.")]
    UnsupportedString { value: String, allowed: String },
    #[error("Literal does not support value {index}. It has only {len} options.")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What went wrong at a single node.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Could not cast to {expected}.")]
    Cast { expected: &'static str },
    #[error("Value {value} does not fit into {target}.")]
    OutOfRange { value: String, target: &'static str },
    #[error("Field not found.")]
    MissingField,
    #[error("Field is not part of the schema.")]
    UnknownField,
    #[error("Unknown discriminator value '{value}'. The following strings are supported: {allowed}.")]
    UnknownTag { value: String, allowed: String },
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error("String '{value}' did not match format '{format}'.")]
    Format { value: String, format: &'static str },
    #[error("Format '{format}' needs an offset or time zone, which a timestamp does not carry.")]
    Unrenderable { format: &'static str },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    CustomConstructor(String),
    #[error("{0}")]
    Custom(String),
}

impl ErrorKind {
    pub fn cast(expected: &'static str) -> Self {
        ErrorKind::Cast { expected }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        ErrorKind::Custom(message.into())
    }
}

/// A single path-qualified parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub path: FieldPath,
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            path: FieldPath::root(),
            kind,
        }
    }

    pub fn missing_field(name: &str) -> Self {
        Self {
            path: PathSegment::Field(SmolStr::new(name)).into(),
            kind: ErrorKind::MissingField,
        }
    }

    pub fn unknown_field(name: &str) -> Self {
        Self {
            path: PathSegment::Field(SmolStr::new(name)).into(),
            kind: ErrorKind::UnknownField,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            return write!(f, "{}", self.kind);
        }
        match &self.kind {
            ErrorKind::MissingField => write!(f, "Field named '{}' not found.", self.path),
            ErrorKind::UnknownField => {
                write!(f, "Field named '{}' is not part of the schema.", self.path)
            }
            kind => write!(f, "Failed to parse field '{}': {kind}", self.path),
        }
    }
}

impl std::error::Error for ParseError {}

/// Every failure found during one parse attempt, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn append(&mut self, other: ParseErrors) {
        self.errors.extend(other.errors);
    }

    /// Re-roots every error under `segment`.
    pub fn prefixed(mut self, segment: PathSegment) -> Self {
        for error in &mut self.errors {
            error.path.prepend(segment.clone());
        }
        self
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<ErrorKind> for ParseErrors {
    fn from(kind: ErrorKind) -> Self {
        ParseError::new(kind).into()
    }
}

impl From<LiteralError> for ParseErrors {
    fn from(error: LiteralError) -> Self {
        ErrorKind::from(error).into()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.errors.as_slice() {
            return write!(f, "{single}");
        }
        write!(f, "Found {} errors:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}) {error}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Errors surfaced by the text entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseErrors),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse_errors(&self) -> Option<&ParseErrors> {
        match self {
            Error::Parse(errors) => Some(errors),
            Error::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_path_display() {
        let mut path = FieldPath::from(PathSegment::Field("lastName".into()));
        path.prepend(PathSegment::Index(2));
        path.prepend(PathSegment::Field("children".into()));
        assert_eq!(path.to_string(), "children[2].lastName");

        let keyed = FieldPath::from(PathSegment::Key("bart".into()));
        assert_eq!(keyed.to_string(), "[\"bart\"]");
    }

    #[rstest::rstest]
    fn test_key_segments_are_escaped() {
        let mut path = FieldPath::from(PathSegment::Key("a\"].b".into()));
        path.prepend(PathSegment::Field("stock".into()));
        assert_eq!(path.to_string(), r#"stock["a\"].b"]"#);
    }

    #[rstest::rstest]
    fn test_single_error_has_no_header() {
        let errors = ParseErrors::from(ParseError::missing_field("children"));
        assert_eq!(errors.to_string(), "Field named 'children' not found.");
    }

    #[rstest::rstest]
    fn test_root_error_prints_kind_only() {
        let errors = ParseErrors::from(ErrorKind::cast("object"));
        assert_eq!(errors.to_string(), "Could not cast to object.");
    }

    #[rstest::rstest]
    fn test_aggregate_is_numbered_in_order() {
        let mut errors = ParseErrors::new();
        errors.append(
            ParseErrors::from(ErrorKind::cast("string"))
                .prefixed(PathSegment::Field("lastName".into())),
        );
        errors.push(ParseError::missing_field("children"));
        assert_eq!(
            errors.to_string(),
            "Found 2 errors:\n1) Failed to parse field 'lastName': Could not cast to string.\n2) Field named 'children' not found."
        );
    }

    #[rstest::rstest]
    fn test_prefix_applies_to_every_error() {
        let mut errors = ParseErrors::new();
        errors.push(ParseError::missing_field("a"));
        errors.push(ParseError::missing_field("b"));
        let errors = errors.prefixed(PathSegment::Index(0));
        let rendered: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(rendered, vec!["[0].a", "[0].b"]);
    }
}
