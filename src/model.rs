//! In-memory records for Event-B contexts and machines
//!
//! Every parsed file becomes one [`Artifact`]. The element records keep the
//! distinction between an attribute that is absent (`None`) and one that is
//! present but empty (`Some(String::new())`), since the text rendering treats
//! the two differently.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::render::{self, RenderOptions};

/// File extension of Rodin context files
pub const CONTEXT_EXTENSION: &str = "buc";
/// File extension of Rodin machine files
pub const MACHINE_EXTENSION: &str = "bum";

/// The two kinds of Event-B components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Context,
    Machine,
}

impl ArtifactKind {
    /// Determine the kind from a file extension, if it is a model file
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(CONTEXT_EXTENSION) => Some(Self::Context),
            Some(MACHINE_EXTENSION) => Some(Self::Machine),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Machine => write!(f, "machine"),
        }
    }
}

/// A declared identifier: carrier set, constant, variable or event parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub identifier: String,
    pub comment: Option<String>,
}

/// A labelled predicate: axiom, invariant or guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPredicate {
    pub label: String,
    pub predicate: String,
    /// Raw value of the theorem attribute; any present value marks a theorem
    pub theorem: Option<String>,
    pub comment: Option<String>,
}

impl LabeledPredicate {
    pub fn is_theorem(&self) -> bool {
        self.theorem.is_some()
    }
}

/// An event witness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    pub label: String,
    pub predicate: String,
    pub comment: Option<String>,
}

/// An event action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub assignment: String,
    pub comment: Option<String>,
}

/// The machine variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub expression: String,
    pub comment: Option<String>,
}

/// Event convergence status as stored by Rodin (`0`, `1`, `2`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convergence {
    #[default]
    Ordinary,
    Convergent,
    Anticipated,
}

impl Convergence {
    /// Parse the numeric attribute value used in `.bum` files
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::Ordinary),
            "1" => Some(Self::Convergent),
            "2" => Some(Self::Anticipated),
            _ => None,
        }
    }

    /// Keyword printed before `event`, if any
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Ordinary => None,
            Self::Convergent => Some("convergent"),
            Self::Anticipated => Some("anticipated"),
        }
    }
}

/// A machine event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub label: String,
    pub convergence: Convergence,
    pub extended: bool,
    pub comment: Option<String>,
    /// Labels of the abstract events this event refines
    pub refines: Vec<String>,
    pub parameters: Vec<Identifier>,
    pub guards: Vec<LabeledPredicate>,
    pub witnesses: Vec<Witness>,
    pub actions: Vec<Action>,
}

impl Event {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            convergence: Convergence::Ordinary,
            extended: false,
            comment: None,
            refines: Vec::new(),
            parameters: Vec::new(),
            guards: Vec::new(),
            witnesses: Vec::new(),
            actions: Vec::new(),
        }
    }
}

/// A parsed `.buc` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub source_path: PathBuf,
    pub comment: Option<String>,
    pub extends: Vec<String>,
    pub sets: Vec<Identifier>,
    pub constants: Vec<Identifier>,
    pub axioms: Vec<LabeledPredicate>,
}

impl Context {
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            comment: None,
            extends: Vec::new(),
            sets: Vec::new(),
            constants: Vec::new(),
            axioms: Vec::new(),
        }
    }
}

/// A parsed `.bum` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub name: String,
    pub source_path: PathBuf,
    pub refines: Option<String>,
    pub sees: Vec<String>,
    pub variables: Vec<Identifier>,
    pub invariants: Vec<LabeledPredicate>,
    pub variant: Option<Variant>,
    pub events: Vec<Event>,
}

impl Machine {
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            refines: None,
            sees: Vec::new(),
            variables: Vec::new(),
            invariants: Vec::new(),
            variant: None,
            events: Vec::new(),
        }
    }
}

/// One parsed context or machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Context(Context),
    Machine(Machine),
}

impl Artifact {
    pub fn name(&self) -> &str {
        match self {
            Self::Context(context) => &context.name,
            Self::Machine(machine) => &machine.name,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Context(_) => ArtifactKind::Context,
            Self::Machine(_) => ArtifactKind::Machine,
        }
    }

    pub fn source_path(&self) -> &Path {
        match self {
            Self::Context(context) => &context.source_path,
            Self::Machine(machine) => &machine.source_path,
        }
    }

    /// Names this artifact depends on, in print order.
    ///
    /// A context depends on the contexts it extends. A machine depends on the
    /// machine it refines first and then on the contexts it sees.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Context(context) => context.extends.iter().map(String::as_str).collect(),
            Self::Machine(machine) => machine
                .refines
                .iter()
                .chain(machine.sees.iter())
                .map(String::as_str)
                .collect(),
        }
    }

    /// Directory containing the source file; artifacts sharing it form one model
    pub fn model_group(&self) -> &Path {
        self.source_path().parent().unwrap_or_else(|| Path::new(""))
    }

    /// Render this artifact as text
    pub fn render(&self, options: &RenderOptions) -> String {
        match self {
            Self::Context(context) => render::render_context(context, options),
            Self::Machine(machine) => render::render_machine(machine, options),
        }
    }
}

impl From<Context> for Artifact {
    fn from(context: Context) -> Self {
        Self::Context(context)
    }
}

impl From<Machine> for Artifact {
    fn from(machine: Machine) -> Self {
        Self::Machine(machine)
    }
}
