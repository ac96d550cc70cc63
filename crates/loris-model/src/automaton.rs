use std::fmt;

use loris_zone::{ClockConstraint, ClockId, Zone};

/// Index of a location within one automaton.
pub type LocationId = usize;
/// Index of a process within the network's declared order.
pub type ProcessId = usize;
/// Index of a discrete variable within the network's variable table.
pub type VarId = usize;
/// Synchronization channel value; an Emit edge and a Recv edge pair up when
/// their resolved channel values are equal.
pub type Channel = usize;

/// Pure function computing clock constraints from the discrete variables.
pub type ConstraintFn = Box<dyn Fn(&[i64]) -> Vec<ClockConstraint> + Send + Sync>;
/// Discrete precondition of an edge.
pub type WhenFn = Box<dyn Fn(&[i64]) -> bool + Send + Sync>;
/// Discrete effect of an edge.
pub type UpdateFn = Box<dyn Fn(&mut [i64]) + Send + Sync>;
/// Per-state synchronization channel selector.
pub type ChannelFn = Box<dyn Fn(&[i64]) -> Option<Channel> + Send + Sync>;

/// A conjunction of clock constraints, used for both location invariants
/// and edge guards. `Computed` conditions read the discrete variables, which
/// is how state-dependent timing (for example a per-process timeout held in
/// a variable) enters the zone.
pub enum ClockCondition {
    True,
    Fixed(Vec<ClockConstraint>),
    Computed(ConstraintFn),
}

impl ClockCondition {
    /// Intersect `zone` with the condition evaluated at `vars`; false iff
    /// the intersection is empty.
    pub fn apply<Z: Zone>(&self, zone: &mut Z, vars: &[i64]) -> bool {
        match self {
            ClockCondition::True => !zone.is_empty(),
            ClockCondition::Fixed(cs) => zone.constrain_all(cs),
            ClockCondition::Computed(f) => zone.constrain_all(&f(vars)),
        }
    }

    /// The fixed constraints, when statically known.
    pub fn fixed_constraints(&self) -> Option<&[ClockConstraint]> {
        match self {
            ClockCondition::Fixed(cs) => Some(cs),
            _ => None,
        }
    }
}

impl fmt::Debug for ClockCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockCondition::True => write!(f, "True"),
            ClockCondition::Fixed(cs) => f.debug_tuple("Fixed").field(cs).finish(),
            ClockCondition::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// A channel value, either declared statically or selected per state (for
/// example a dynamically allocated message slot).
pub enum ChannelExpr {
    Fixed(Channel),
    Computed(ChannelFn),
}

impl ChannelExpr {
    /// `None` from a `Computed` selector means the model could not name a
    /// channel (for example slot exhaustion); the successor generator
    /// treats that as a model-definition error.
    pub fn resolve(&self, vars: &[i64]) -> Option<Channel> {
        match self {
            ChannelExpr::Fixed(c) => Some(*c),
            ChannelExpr::Computed(f) => f(vars),
        }
    }
}

impl fmt::Debug for ChannelExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelExpr::Fixed(c) => f.debug_tuple("Fixed").field(c).finish(),
            ChannelExpr::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// Synchronization label of an edge. A rendezvous pairs one `Emit` edge with
/// one `Recv` edge on the same resolved channel; the emitter fires first, so
/// payload variables it writes are visible to the receiver's precondition
/// and effect.
#[derive(Debug)]
pub enum SyncLabel {
    Internal,
    Emit(ChannelExpr),
    Recv(ChannelExpr),
}

impl SyncLabel {
    pub fn is_internal(&self) -> bool {
        matches!(self, SyncLabel::Internal)
    }
}

/// One outgoing edge of a location.
pub struct Edge {
    pub target: LocationId,
    pub guard: ClockCondition,
    pub when: Option<WhenFn>,
    pub sync: SyncLabel,
    pub resets: Vec<(ClockId, i32)>,
    pub update: Option<UpdateFn>,
}

impl Edge {
    pub fn to(target: LocationId) -> Self {
        Edge {
            target,
            guard: ClockCondition::True,
            when: None,
            sync: SyncLabel::Internal,
            resets: Vec::new(),
            update: None,
        }
    }

    /// Fixed clock guard.
    pub fn guard(mut self, cs: Vec<ClockConstraint>) -> Self {
        self.guard = ClockCondition::Fixed(cs);
        self
    }

    /// Clock guard computed from the discrete variables.
    pub fn guard_with(
        mut self,
        f: impl Fn(&[i64]) -> Vec<ClockConstraint> + Send + Sync + 'static,
    ) -> Self {
        self.guard = ClockCondition::Computed(Box::new(f));
        self
    }

    /// Discrete precondition.
    pub fn when(mut self, f: impl Fn(&[i64]) -> bool + Send + Sync + 'static) -> Self {
        self.when = Some(Box::new(f));
        self
    }

    pub fn emit(mut self, channel: Channel) -> Self {
        self.sync = SyncLabel::Emit(ChannelExpr::Fixed(channel));
        self
    }

    pub fn emit_with(
        mut self,
        f: impl Fn(&[i64]) -> Option<Channel> + Send + Sync + 'static,
    ) -> Self {
        self.sync = SyncLabel::Emit(ChannelExpr::Computed(Box::new(f)));
        self
    }

    pub fn recv(mut self, channel: Channel) -> Self {
        self.sync = SyncLabel::Recv(ChannelExpr::Fixed(channel));
        self
    }

    pub fn recv_with(
        mut self,
        f: impl Fn(&[i64]) -> Option<Channel> + Send + Sync + 'static,
    ) -> Self {
        self.sync = SyncLabel::Recv(ChannelExpr::Computed(Box::new(f)));
        self
    }

    /// Reset a clock to 0.
    pub fn reset(self, clock: ClockId) -> Self {
        self.reset_to(clock, 0)
    }

    pub fn reset_to(mut self, clock: ClockId, value: i32) -> Self {
        self.resets.push((clock, value));
        self
    }

    /// Discrete effect.
    pub fn update(mut self, f: impl Fn(&mut [i64]) + Send + Sync + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("target", &self.target)
            .field("guard", &self.guard)
            .field("when", &self.when.as_ref().map(|_| ".."))
            .field("sync", &self.sync)
            .field("resets", &self.resets)
            .field("update", &self.update.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A location with its invariant, committed flag, and outgoing edges.
#[derive(Debug)]
pub struct Location {
    pub name: String,
    pub invariant: ClockCondition,
    pub committed: bool,
    pub edges: Vec<Edge>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Location {
            name: name.into(),
            invariant: ClockCondition::True,
            committed: false,
            edges: Vec::new(),
        }
    }

    /// Fixed invariant.
    pub fn invariant(mut self, cs: Vec<ClockConstraint>) -> Self {
        self.invariant = ClockCondition::Fixed(cs);
        self
    }

    /// Invariant computed from the discrete variables.
    pub fn invariant_with(
        mut self,
        f: impl Fn(&[i64]) -> Vec<ClockConstraint> + Send + Sync + 'static,
    ) -> Self {
        self.invariant = ClockCondition::Computed(Box::new(f));
        self
    }

    /// Time may not elapse here, and outgoing transitions take priority
    /// over every non-committed process's transitions.
    pub fn committed(mut self) -> Self {
        self.committed = true;
        self
    }

    pub fn edge(mut self, e: Edge) -> Self {
        self.edges.push(e);
        self
    }
}

/// One process: a fixed list of locations and, per location, its outgoing
/// edges.
#[derive(Debug)]
pub struct Automaton {
    pub name: String,
    pub initial: LocationId,
    pub locations: Vec<Location>,
}

impl Automaton {
    pub fn new(name: impl Into<String>) -> Self {
        Automaton {
            name: name.into(),
            initial: 0,
            locations: Vec::new(),
        }
    }

    pub fn add_location(&mut self, loc: Location) -> LocationId {
        let id = self.locations.len();
        self.locations.push(loc);
        id
    }

    pub fn find_location_by_name(&self, name: &str) -> Option<LocationId> {
        self.locations.iter().position(|l| l.name == name)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for (i, loc) in self.locations.iter().enumerate() {
            let initial = if i == self.initial { " (initial)" } else { "" };
            let committed = if loc.committed { " (committed)" } else { "" };
            writeln!(f, "  L{i}: {}{initial}{committed}", loc.name)?;
            for e in &loc.edges {
                let sync = match &e.sync {
                    SyncLabel::Internal => String::new(),
                    SyncLabel::Emit(ChannelExpr::Fixed(c)) => format!(" !{c}"),
                    SyncLabel::Emit(ChannelExpr::Computed(_)) => " !<computed>".to_string(),
                    SyncLabel::Recv(ChannelExpr::Fixed(c)) => format!(" ?{c}"),
                    SyncLabel::Recv(ChannelExpr::Computed(_)) => " ?<computed>".to_string(),
                };
                writeln!(f, "    -> L{}{sync}", e.target)?;
            }
        }
        Ok(())
    }
}
