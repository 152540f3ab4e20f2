//! Syntax tree types for parsed netlists.

/// Complete representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct NetlistAst {
    /// Component lines in file order
    pub components: Vec<ComponentDef>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component line from the netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Component type (V, R)
    pub component_type: ComponentType,
    /// Identifier token as written
    pub name: String,
    /// Node the branch leaves
    pub source_node: usize,
    /// Node the branch enters
    pub dest_node: usize,
    /// Volts for a source, ohms for a resistor
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the netlist format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Resistor
    Resistor,
    /// Independent voltage source
    VoltageSource,
}

impl ComponentType {
    /// Parse a component type from the first character of its identifier.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'V' => Some(Self::VoltageSource),
            _ => None,
        }
    }
}
