//! Page input: systems of glyph descriptors and the relations between them

use serde::Deserialize;
use sig_graph::{InterDescriptor, Relation, SIGraph, Support, SupportKind};
use sig_types::{InterId, SigConfig, SystemId};
use std::path::Path;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// A page as produced by the upstream classifier.
#[derive(Debug, Deserialize)]
pub struct PageInput {
    pub systems: Vec<SystemInput>,
}

#[derive(Debug, Deserialize)]
pub struct SystemInput {
    pub id: u32,
    pub inters: Vec<InterDescriptor>,
    #[serde(default)]
    pub relations: Vec<RelationInput>,
}

/// A relation between two inters of the same system, by position in
/// `inters`.
#[derive(Debug, Deserialize)]
pub struct RelationInput {
    pub source: usize,
    pub target: usize,
    pub relation: RelationDecl,
}

/// Relation kind; support weights default to the configured ones.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelationDecl {
    Support {
        kind: SupportKind,
        weight: Option<f64>,
    },
    Exclusion,
    Containment,
}

impl RelationDecl {
    fn to_relation(&self, config: &SigConfig) -> Relation {
        match self {
            Self::Support { kind, weight } => match weight {
                Some(weight) => Relation::Support(Support::with_weight(*kind, *weight)),
                None => Relation::support(*kind, &config.weights),
            },
            Self::Exclusion => Relation::Exclusion,
            Self::Containment => Relation::Containment,
        }
    }
}

impl PageInput {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// One SIG per system, in input order.
    pub fn build(&self, config: &SigConfig) -> CliResult<Vec<SIGraph>> {
        self.systems.iter().map(|s| s.build(config)).collect()
    }
}

impl SystemInput {
    fn build(&self, config: &SigConfig) -> CliResult<SIGraph> {
        let system = SystemId(self.id);
        let graph_err = |error| CliError::Graph { system, error };

        let mut sig = SIGraph::new(system, config.clone()).map_err(graph_err)?;
        let ids: Vec<InterId> = self
            .inters
            .iter()
            .map(|descriptor| sig.add_inter(descriptor.clone()))
            .collect::<Result<_, _>>()
            .map_err(graph_err)?;

        for (i, rel) in self.relations.iter().enumerate() {
            let lookup = |index: usize| {
                ids.get(index).copied().ok_or(CliError::MissingInter {
                    system,
                    relation: i,
                    index,
                })
            };
            let source = lookup(rel.source)?;
            let target = lookup(rel.target)?;
            sig.add_relation(source, target, rel.relation.to_relation(config))
                .map_err(graph_err)?;
        }

        debug!(
            %system,
            inters = ids.len(),
            relations = self.relations.len(),
            "System loaded"
        );
        Ok(sig)
    }
}
