use kdl::{KdlDocument, KdlNode, KdlValue};
use miette::Diagnostic;
use thiserror::Error;

// Type annotations such as `(u8)"x"` are rejected rather than ignored.
const ANNOTATION_FREE: &str = "a value without a type annotation";

/// A record that can be built from a KDL document.
///
/// Each field is a top-level node named after it, holding one value
/// (`name "demo"`) or, for nested records, a child block (`server { port 80 }`).
pub trait FromDocument: Sized {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError>;
}

impl FromDocument for KdlDocument {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError> {
        Ok(doc.clone())
    }
}

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown field: {0}")]
    #[diagnostic(
        code(schema::unknown_field),
        help("Remove the node or check its spelling")
    )]
    UnknownField(String),

    #[error("Field declared more than once: {0}")]
    #[diagnostic(code(schema::duplicate_field))]
    DuplicateField(String),

    #[error("Missing required field: {0}")]
    #[diagnostic(code(schema::missing_field))]
    MissingField(&'static str),

    #[error("Invalid value for {field}: expected {expected}")]
    #[diagnostic(code(schema::wrong_type))]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Value for {0} does not fit in a 64-bit integer")]
    #[diagnostic(code(schema::out_of_range))]
    OutOfRange(&'static str),

    #[error("Malformed field: {0}")]
    #[diagnostic(
        code(schema::malformed_field),
        help("Scalar fields take exactly one value and no properties or children")
    )]
    Malformed(&'static str),
}

/// Typed access to the fields of one document level.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    doc: &'a KdlDocument,
}

impl<'a> Fields<'a> {
    /// Fails if the document holds a node outside `known` or repeats one.
    pub fn new(doc: &'a KdlDocument, known: &[&str]) -> Result<Self, SchemaError> {
        let mut seen: Vec<&str> = Vec::with_capacity(doc.nodes().len());

        for node in doc.nodes() {
            let name = node.name().value();

            if !known.contains(&name) {
                return Err(SchemaError::UnknownField(name.to_string()));
            }
            if seen.contains(&name) {
                return Err(SchemaError::DuplicateField(name.to_string()));
            }
            seen.push(name);
        }

        Ok(Self { doc })
    }

    fn node(&self, name: &str) -> Option<&'a KdlNode> {
        self.doc.get(name)
    }

    fn scalar(&self, name: &'static str) -> Result<Option<&'a KdlValue>, SchemaError> {
        let Some(node) = self.node(name) else {
            return Ok(None);
        };

        match node.entries() {
            [entry] if entry.name().is_none() && node.children().is_none() => {
                if entry.ty().is_some() {
                    return Err(SchemaError::WrongType {
                        field: name,
                        expected: ANNOTATION_FREE,
                    });
                }
                Ok(Some(entry.value()))
            }
            _ => Err(SchemaError::Malformed(name)),
        }
    }

    pub fn optional_string(&self, name: &'static str) -> Result<Option<String>, SchemaError> {
        self.scalar(name)?
            .map(|value| {
                value
                    .as_string()
                    .map(str::to_owned)
                    .ok_or(SchemaError::WrongType {
                        field: name,
                        expected: "a string",
                    })
            })
            .transpose()
    }

    pub fn string(&self, name: &'static str) -> Result<String, SchemaError> {
        self.optional_string(name)?
            .ok_or(SchemaError::MissingField(name))
    }

    pub fn optional_integer(&self, name: &'static str) -> Result<Option<i64>, SchemaError> {
        self.scalar(name)?
            .map(|value| {
                let raw = value.as_integer().ok_or(SchemaError::WrongType {
                    field: name,
                    expected: "an integer",
                })?;
                i64::try_from(raw).map_err(|_| SchemaError::OutOfRange(name))
            })
            .transpose()
    }

    pub fn integer(&self, name: &'static str) -> Result<i64, SchemaError> {
        self.optional_integer(name)?
            .ok_or(SchemaError::MissingField(name))
    }

    /// Integers are accepted here too.
    pub fn optional_float(&self, name: &'static str) -> Result<Option<f64>, SchemaError> {
        self.scalar(name)?
            .map(|value| {
                value
                    .as_float()
                    .or_else(|| value.as_integer().map(|i| i as f64))
                    .ok_or(SchemaError::WrongType {
                        field: name,
                        expected: "a number",
                    })
            })
            .transpose()
    }

    pub fn float(&self, name: &'static str) -> Result<f64, SchemaError> {
        self.optional_float(name)?
            .ok_or(SchemaError::MissingField(name))
    }

    pub fn optional_boolean(&self, name: &'static str) -> Result<Option<bool>, SchemaError> {
        self.scalar(name)?
            .map(|value| {
                value.as_bool().ok_or(SchemaError::WrongType {
                    field: name,
                    expected: "a boolean",
                })
            })
            .transpose()
    }

    pub fn boolean(&self, name: &'static str) -> Result<bool, SchemaError> {
        self.optional_boolean(name)?
            .ok_or(SchemaError::MissingField(name))
    }

    /// All positional values of the node; empty when the node is absent.
    pub fn strings(&self, name: &'static str) -> Result<Vec<String>, SchemaError> {
        let Some(node) = self.node(name) else {
            return Ok(Vec::new());
        };

        if node.children().is_some() {
            return Err(SchemaError::Malformed(name));
        }

        node.entries()
            .iter()
            .map(|entry| {
                if entry.name().is_some() {
                    return Err(SchemaError::Malformed(name));
                }
                if entry.ty().is_some() {
                    return Err(SchemaError::WrongType {
                        field: name,
                        expected: ANNOTATION_FREE,
                    });
                }
                entry
                    .value()
                    .as_string()
                    .map(str::to_owned)
                    .ok_or(SchemaError::WrongType {
                        field: name,
                        expected: "a list of strings",
                    })
            })
            .collect()
    }

    pub fn optional_record<T: FromDocument>(
        &self,
        name: &'static str,
    ) -> Result<Option<T>, SchemaError> {
        let Some(node) = self.node(name) else {
            return Ok(None);
        };

        if !node.entries().is_empty() {
            return Err(SchemaError::Malformed(name));
        }

        let children = node.children().ok_or(SchemaError::WrongType {
            field: name,
            expected: "a block",
        })?;

        T::from_document(children).map(Some)
    }

    pub fn record<T: FromDocument>(&self, name: &'static str) -> Result<T, SchemaError> {
        self.optional_record(name)?
            .ok_or(SchemaError::MissingField(name))
    }
}
