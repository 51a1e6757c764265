//! The per-system Symbol Interpretation Graph.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use sig_types::{EnsemblePolicy, Grade, InterId, Rect, SigConfig, SystemId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::abnormal;
use crate::error::{GraphError, GraphResult};
use crate::grade;
use crate::inter::{Inter, InterDescriptor, InterStatus};
use crate::relation::{Relation, RelationRef, RelationType};
use crate::spatial::GridIndex;

/// Graph of candidate interpretations for one system.
///
/// The SIG is the sole owner of its Inters (arena slots that are never
/// reused) and of the relations between them. REMOVED Inters keep their slot
/// but lose every incident relation and leave the spatial index.
///
/// Invariants:
/// - exclusion is symmetric, stored once per unordered pair
/// - containment is a forest: one parent per member, no cycles
/// - a REMOVED Inter has no incident relation
/// - every relation stays within the system
#[derive(Clone, Debug)]
pub struct SIGraph {
    system: SystemId,
    config: SigConfig,
    graph: StableDiGraph<Inter, Relation>,
    index: GridIndex,
}

impl SIGraph {
    pub fn new(system: SystemId, config: SigConfig) -> GraphResult<Self> {
        config.validate()?;
        let index = GridIndex::new(config.grid_cell_size);
        Ok(Self {
            system,
            config,
            graph: StableDiGraph::new(),
            index,
        })
    }

    /// Empty graph with the default configuration.
    pub fn with_defaults(system: SystemId) -> Self {
        let config = SigConfig::default();
        Self {
            system,
            index: GridIndex::new(config.grid_cell_size),
            config,
            graph: StableDiGraph::new(),
        }
    }

    pub fn system(&self) -> SystemId {
        self.system
    }

    pub fn config(&self) -> &SigConfig {
        &self.config
    }

    // ── Vertices ────────────────────────────────────────────────────────

    /// Create an Inter from an upstream descriptor.
    pub fn add_inter(&mut self, descriptor: InterDescriptor) -> GraphResult<InterId> {
        descriptor.bounds.validate()?;
        let index = self.graph.node_count() as u32;
        let id = InterId::new(self.system, index);
        let inter = Inter::new(id, &descriptor);
        let node = self.graph.add_node(inter);
        debug_assert_eq!(node.index() as u32, index);
        self.index.insert(id, descriptor.bounds);
        trace!(%id, shape = %descriptor.shape, grade = %descriptor.grade, "Inter added");
        Ok(id)
    }

    pub fn inter(&self, id: InterId) -> GraphResult<&Inter> {
        let node = self.node(id)?;
        Ok(&self.graph[node])
    }

    pub fn get(&self, id: InterId) -> Option<&Inter> {
        self.inter(id).ok()
    }

    pub fn contains(&self, id: InterId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of Inters ever added, removed ones included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All Inters in id order, removed ones included.
    pub fn inters(&self) -> impl Iterator<Item = &Inter> + '_ {
        self.graph.node_indices().map(move |n| &self.graph[n])
    }

    pub fn active_inters(&self) -> Vec<&Inter> {
        self.inters().filter(|i| i.is_active()).collect()
    }

    pub fn active_ids(&self) -> Vec<InterId> {
        self.inters()
            .filter(|i| i.is_active())
            .map(|i| i.id())
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.inters().filter(|i| i.is_active()).count()
    }

    /// ACTIVE Inters currently flagged as structurally incomplete.
    pub fn abnormal_inters(&self) -> Vec<&Inter> {
        self.inters()
            .filter(|i| i.is_active() && i.is_abnormal())
            .collect()
    }

    /// Remove an Inter, severing all its relations.
    ///
    /// When the Inter is an ensemble and the policy is
    /// [`EnsemblePolicy::Cascade`], its members are removed as well. Returns
    /// every Inter that transitioned to REMOVED, in id order.
    pub fn remove_inter(&mut self, id: InterId) -> GraphResult<Vec<InterId>> {
        let removed = self.removal_set(id)?;
        for &current in &removed {
            let node = self.node(current)?;
            self.detach(node);
            self.graph[node].set_status(InterStatus::Removed);
            self.index.remove(current);
        }

        debug!(%id, cascade = removed.len() - 1, "Inter removed");
        Ok(removed)
    }

    /// Inters that [`SIGraph::remove_inter`] would remove for `id`, in id
    /// order, without touching the graph.
    pub fn removal_set(&self, id: InterId) -> GraphResult<Vec<InterId>> {
        let node = self.node(id)?;
        if self.graph[node].is_removed() {
            return Err(GraphError::InterRemoved(id));
        }

        let mut removed = BTreeSet::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = self.node(current)?;
            if self.graph[node].is_removed() || !removed.insert(current) {
                continue;
            }
            if self.graph[node].kind().ensemble().is_some()
                && self.config.ensemble_policy == EnsemblePolicy::Cascade
            {
                pending.extend(self.members_of(current));
            }
        }
        Ok(removed.into_iter().collect())
    }

    /// Bring a REMOVED Inter back. Its former relations are not restored.
    pub fn reinstate_inter(&mut self, id: InterId) -> GraphResult<()> {
        let node = self.node(id)?;
        if self.graph[node].is_active() {
            return Err(GraphError::AlreadyActive(id));
        }
        self.graph[node].set_status(InterStatus::Active);
        let bounds = self.graph[node].bounds();
        self.index.insert(id, bounds);
        debug!(%id, "Inter reinstated");
        Ok(())
    }

    pub fn set_bounds(&mut self, id: InterId, bounds: Rect) -> GraphResult<()> {
        bounds.validate()?;
        let node = self.active_node(id)?;
        self.graph[node].set_bounds(bounds);
        self.index.insert(id, bounds);
        Ok(())
    }

    /// Change the intrinsic grade, invalidating the Inter and its supported
    /// neighbors.
    pub fn set_grade(&mut self, id: InterId, grade: Grade) -> GraphResult<()> {
        let node = self.active_node(id)?;
        self.graph[node].set_grade(grade);
        for other in self.neighbor_nodes(node) {
            self.graph[other].invalidate();
        }
        Ok(())
    }

    pub fn set_abnormal(&mut self, id: InterId, abnormal: bool) -> GraphResult<()> {
        let node = self.active_node(id)?;
        self.graph[node].set_abnormal(abnormal);
        Ok(())
    }

    /// Evaluate the structural completeness rule of an Inter and store the
    /// resulting flag. Returns the new flag.
    pub fn evaluate_abnormal(&mut self, id: InterId) -> GraphResult<bool> {
        let flag = abnormal::check_abnormal(self, id)?;
        self.set_abnormal(id, flag)?;
        Ok(flag)
    }

    // ── Grades ──────────────────────────────────────────────────────────

    /// Contextual grade, served from cache when still valid.
    pub fn contextual_grade(&mut self, id: InterId) -> GraphResult<Grade> {
        let node = self.node(id)?;
        if let Some(cached) = self.graph[node].contextual_grade() {
            return Ok(cached);
        }
        self.refresh_contextual_grade(id)
    }

    /// Recompute the contextual grade from the current neighbor state.
    pub fn refresh_contextual_grade(&mut self, id: InterId) -> GraphResult<Grade> {
        let value = grade::contextual_grade(self, id)?;
        let node = self.node(id)?;
        self.graph[node].set_contextual(value);
        Ok(value)
    }

    // ── Edges ───────────────────────────────────────────────────────────

    /// Insert a relation after full structural validation.
    pub fn add_relation(
        &mut self,
        source: InterId,
        target: InterId,
        relation: Relation,
    ) -> GraphResult<()> {
        let s = self.active_node(source)?;
        let t = self.active_node(target)?;
        if s == t {
            return Err(GraphError::SelfRelation(source));
        }
        relation.validate(&self.graph[s], &self.graph[t])?;

        let ty = relation.relation_type();
        if self.find_edge(s, t, ty, relation.is_symmetric()).is_some() {
            return Err(GraphError::DuplicateRelation {
                relation: ty,
                from: source,
                to: target,
            });
        }

        if ty == RelationType::Containment {
            self.check_containment(source, target)?;
        }

        self.graph.add_edge(s, t, relation);
        self.graph[s].invalidate();
        self.graph[t].invalidate();
        trace!(%source, %target, relation = %ty, "Relation added");
        Ok(())
    }

    /// Remove the relation of the given type between two Inters.
    pub fn remove_relation(
        &mut self,
        source: InterId,
        target: InterId,
        ty: RelationType,
    ) -> GraphResult<Relation> {
        let s = self.node(source)?;
        let t = self.node(target)?;
        let edge = self
            .find_edge(s, t, ty, false)
            .ok_or(GraphError::RelationNotFound {
                relation: ty,
                from: source,
                to: target,
            })?;
        let relation = self
            .graph
            .remove_edge(edge)
            .ok_or(GraphError::RelationNotFound {
                relation: ty,
                from: source,
                to: target,
            })?;
        self.graph[s].invalidate();
        self.graph[t].invalidate();
        Ok(relation)
    }

    /// Relation of the given type between two Inters, either direction for
    /// symmetric relations.
    pub fn relation(&self, a: InterId, b: InterId, ty: RelationType) -> Option<RelationRef> {
        let s = self.node(a).ok()?;
        let t = self.node(b).ok()?;
        let edge = self.find_edge(s, t, ty, false)?;
        self.edge_ref(edge)
    }

    /// Whether any relation links the two Inters, in either direction.
    pub fn are_related(&self, a: InterId, b: InterId) -> bool {
        match (self.node(a), self.node(b)) {
            (Ok(s), Ok(t)) => self
                .incident_edges(s)
                .into_iter()
                .any(|e| matches!(self.graph.edge_endpoints(e), Some((x, y)) if x == t || y == t)),
            _ => false,
        }
    }

    /// All relations touching an Inter, sorted.
    pub fn relations_of(&self, id: InterId) -> Vec<RelationRef> {
        let Ok(node) = self.node(id) else {
            return Vec::new();
        };
        let mut refs: Vec<RelationRef> = self
            .incident_edges(node)
            .into_iter()
            .filter_map(|e| self.edge_ref(e))
            .collect();
        sort_refs(&mut refs);
        refs
    }

    pub fn relations_of_type(&self, id: InterId, ty: RelationType) -> Vec<RelationRef> {
        self.relations_of(id)
            .into_iter()
            .filter(|r| r.relation.relation_type() == ty)
            .collect()
    }

    /// Other endpoints of the relations of a type touching an Inter.
    pub fn partners(&self, id: InterId, ty: RelationType) -> Vec<InterId> {
        let mut partners: Vec<InterId> = self
            .relations_of_type(id, ty)
            .iter()
            .map(|r| r.other(id))
            .collect();
        partners.sort();
        partners.dedup();
        partners
    }

    pub fn exclusion_partners(&self, id: InterId) -> Vec<InterId> {
        self.partners(id, RelationType::Exclusion)
    }

    /// Every relation in the graph, sorted.
    pub fn relations(&self) -> Vec<RelationRef> {
        let mut refs: Vec<RelationRef> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.edge_ref(e))
            .collect();
        sort_refs(&mut refs);
        refs
    }

    pub fn relations_by_type(&self, ty: RelationType) -> Vec<RelationRef> {
        self.relations()
            .into_iter()
            .filter(|r| r.relation.relation_type() == ty)
            .collect()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    // ── Ensembles ───────────────────────────────────────────────────────

    /// The ensemble containing an Inter, if any.
    pub fn ensemble_of(&self, id: InterId) -> Option<InterId> {
        let node = self.node(id).ok()?;
        self.graph
            .edges_directed(node, Direction::Incoming)
            .find(|e| *e.weight() == Relation::Containment)
            .map(|e| self.graph[e.source()].id())
    }

    /// Members of an ensemble, in id order.
    pub fn members_of(&self, id: InterId) -> Vec<InterId> {
        let Ok(node) = self.node(id) else {
            return Vec::new();
        };
        let mut members: Vec<InterId> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .filter(|e| *e.weight() == Relation::Containment)
            .map(|e| self.graph[e.target()].id())
            .collect();
        members.sort();
        members
    }

    // ── Spatial queries ─────────────────────────────────────────────────

    /// ACTIVE Inters whose bounds strictly overlap `region`.
    pub fn intersecting(&self, region: &Rect) -> Vec<InterId> {
        self.index
            .candidates(region)
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .is_some_and(|i| i.is_active() && i.bounds().intersects(region))
            })
            .collect()
    }

    /// ACTIVE Inters whose core bounds strictly overlap `region`.
    pub fn intersecting_core(&self, region: &Rect) -> Vec<InterId> {
        let ratios = self.config.shrink;
        self.index
            .candidates(region)
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .is_some_and(|i| i.is_active() && i.core_bounds(&ratios).intersects(region))
            })
            .collect()
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Full copy of the graph, usable to undo or to abort a pass.
    pub fn snapshot(&self) -> SIGraph {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: SIGraph) -> GraphResult<()> {
        if snapshot.system != self.system {
            return Err(GraphError::SnapshotMismatch {
                expected: self.system,
                actual: snapshot.system,
            });
        }
        *self = snapshot;
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn node(&self, id: InterId) -> GraphResult<NodeIndex> {
        if id.system != self.system {
            return Err(GraphError::ForeignSystem {
                expected: self.system,
                inter: id,
            });
        }
        let node = NodeIndex::new(id.index as usize);
        if self.graph.contains_node(node) {
            Ok(node)
        } else {
            Err(GraphError::UnknownInter(id))
        }
    }

    fn active_node(&self, id: InterId) -> GraphResult<NodeIndex> {
        let node = self.node(id)?;
        if self.graph[node].is_removed() {
            return Err(GraphError::InterRemoved(id));
        }
        Ok(node)
    }

    fn incident_edges(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .map(|e| e.id())
            .collect()
    }

    fn neighbor_nodes(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.incident_edges(node)
            .into_iter()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(s, t)| if s == node { t } else { s })
            .collect()
    }

    /// Sever every relation of a node, invalidating the other endpoints.
    fn detach(&mut self, node: NodeIndex) {
        for other in self.neighbor_nodes(node) {
            self.graph[other].invalidate();
        }
        for edge in self.incident_edges(node) {
            self.graph.remove_edge(edge);
        }
    }

    /// Edge of type `ty` from `s` to `t`, or from `t` to `s` when either the
    /// stored edge or the probe (`reverse_symmetric`) is symmetric.
    fn find_edge(
        &self,
        s: NodeIndex,
        t: NodeIndex,
        ty: RelationType,
        reverse_symmetric: bool,
    ) -> Option<EdgeIndex> {
        let forward = self
            .graph
            .edges_directed(s, Direction::Outgoing)
            .find(|e| e.target() == t && e.weight().relation_type() == ty)
            .map(|e| e.id());
        forward.or_else(|| {
            self.graph
                .edges_directed(t, Direction::Outgoing)
                .find(|e| {
                    e.target() == s
                        && e.weight().relation_type() == ty
                        && (reverse_symmetric || e.weight().is_symmetric())
                })
                .map(|e| e.id())
        })
    }

    fn check_containment(&self, parent: InterId, child: InterId) -> GraphResult<()> {
        if let Some(existing) = self.ensemble_of(child) {
            return Err(GraphError::SecondParent {
                child,
                parent: existing,
            });
        }

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(GraphError::ContainmentCycle { parent, child });
            }
            ancestor = self.ensemble_of(current);
        }

        let kind = self.inter(parent)?.kind().ensemble();
        if let Some(max) = kind.and_then(|k| k.max_members()) {
            if self.members_of(parent).len() >= max {
                return Err(GraphError::ArityExceeded {
                    ensemble: parent,
                    max,
                });
            }
        }
        Ok(())
    }

    fn edge_ref(&self, edge: EdgeIndex) -> Option<RelationRef> {
        let (s, t) = self.graph.edge_endpoints(edge)?;
        Some(RelationRef {
            source: self.graph[s].id(),
            target: self.graph[t].id(),
            relation: *self.graph.edge_weight(edge)?,
        })
    }
}

fn sort_refs(refs: &mut [RelationRef]) {
    refs.sort_by_key(|r| (r.source, r.target, r.relation.relation_type()));
}
