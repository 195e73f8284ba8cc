use serde::{Deserialize, Serialize};

pub const ROOT_NODE_ID: &str = "root-user";
pub const CENTER_X: f64 = 50.0;
pub const CENTER_Y: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    User,
    Breach,
    Exposure,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Lower rank sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdgeKind {
    Radial,
    Mesh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl GraphNode {
    /// The identity node every graph is centred on.
    pub fn root(label: &str, sub_label: Option<&str>) -> Self {
        Self {
            id: ROOT_NODE_ID.to_string(),
            label: label.to_string(),
            sub_label: sub_label.map(str::to_string),
            kind: NodeKind::User,
            severity: None,
            source: None,
            icon_type: None,
            date: None,
            x: Some(CENTER_X),
            y: Some(CENTER_Y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

impl GraphEdge {
    /// Animated spoke from the root node to `target`.
    pub fn radial(target: &str) -> Self {
        Self {
            id: format!("edge-root-{}", target),
            source: ROOT_NODE_ID.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Radial,
            animated: Some(true),
        }
    }
}

/// Presentation view derived from a report. Not authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub risk_score: u8,
}

impl SecurityGraph {
    pub fn root_only(label: &str, sub_label: Option<&str>, risk_score: u8) -> Self {
        Self {
            nodes: vec![GraphNode::root(label, sub_label)],
            edges: Vec::new(),
            risk_score,
        }
    }
}

/// Position of entity `index` out of `count` on a circle around the centre.
pub fn orbit_position(index: usize, count: usize, radius: f64) -> (f64, f64) {
    if count == 0 {
        return (CENTER_X, CENTER_Y);
    }
    let angle = (index as f64 / count as f64) * std::f64::consts::TAU;
    (CENTER_X + radius * angle.cos(), CENTER_Y + radius * angle.sin())
}
