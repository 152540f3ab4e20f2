//! Component models for the tableau.
//!
//! This module provides models for the supported two-terminal elements:
//! - Linear: Resistor
//! - Sources: Voltage Source
//!
//! Each component contributes one constitutive row to the tableau:
//!
//! ```text
//! a_v * v_b + a_i * i_b = s_b
//! ```
//!
//! where `a_v` is the voltage coefficient, `a_i` the current coefficient and
//! `s_b` the independent source value for branch `b`.

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::VoltageSource;

use crate::circuit::{BranchId, NodeId};
use crate::error::{Result, TableauError};
use crate::netlist::{ComponentDef, ComponentType};

/// A circuit component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
}

impl Component {
    /// Create a component from a netlist definition.
    pub fn from_def(branch: BranchId, def: &ComponentDef) -> Result<Self> {
        let nodes = [NodeId(def.source_node), NodeId(def.dest_node)];

        if !def.value.is_finite() {
            return Err(TableauError::InvalidParameter {
                component: def.name.clone(),
                param: "value".to_string(),
                message: format!("expected a finite number, got {}", def.value),
            });
        }

        match def.component_type {
            ComponentType::Resistor => Ok(Component::Resistor(Resistor::new(
                branch,
                def.name.clone(),
                nodes,
                def.value,
            ))),
            ComponentType::VoltageSource => Ok(Component::VoltageSource(VoltageSource::new(
                branch,
                def.name.clone(),
                nodes,
                def.value,
            ))),
        }
    }

    /// Get the branch this component occupies.
    pub fn branch(&self) -> BranchId {
        match self {
            Component::Resistor(r) => r.branch,
            Component::VoltageSource(v) => v.branch,
        }
    }

    /// Get the component name.
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor(r) => &r.name,
            Component::VoltageSource(v) => &v.name,
        }
    }

    /// Get the terminals as `[source, destination]`.
    pub fn nodes(&self) -> [NodeId; 2] {
        match self {
            Component::Resistor(r) => r.nodes,
            Component::VoltageSource(v) => v.nodes,
        }
    }

    /// Coefficient of the branch voltage in the constitutive row.
    pub fn voltage_coefficient(&self) -> f64 {
        1.0
    }

    /// Coefficient of the branch current in the constitutive row.
    pub fn current_coefficient(&self) -> f64 {
        match self {
            Component::Resistor(r) => r.current_coefficient(),
            Component::VoltageSource(_) => 0.0,
        }
    }

    /// Right-hand side of the constitutive row.
    pub fn source_value(&self) -> f64 {
        match self {
            Component::Resistor(_) => 0.0,
            Component::VoltageSource(v) => v.voltage,
        }
    }

    /// Highest node index this component touches.
    pub fn max_node(&self) -> NodeId {
        let [a, b] = self.nodes();
        a.max(b)
    }

    /// Check if both terminals are the same node.
    pub fn is_self_loop(&self) -> bool {
        let [a, b] = self.nodes();
        a == b
    }
}
