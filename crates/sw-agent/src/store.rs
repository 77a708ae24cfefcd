//! Bug storage: `BugStore` (ordered collection) and `AgentRngs` (per-bug RNG).
//!
//! # Why two structs?
//!
//! A bug's step reads the whole swarm (`&BugStore`, through the environment)
//! while drawing from its own RNG (`&mut AgentRng`).  Keeping RNGs outside the
//! store lets both borrows coexist without cloning either.
//!
//! # Tombstones
//!
//! `BugStore` keeps one slot per id ever issued.  Removing a bug empties its
//! slot instead of shifting the vector, so:
//!
//! - ids stay valid as direct indices (`slots[id.index()]`);
//! - a driver iterating a snapshot of ids never skips or revisits a bug when
//!   another one is removed mid-tick;
//! - collection order (ascending id) is insertion order.

use sw_core::{AgentId, AgentRng, Vec2};

use crate::Bug;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-bug deterministic RNG state, indexed by `AgentId`.
///
/// Streams are created lazily from the global seed and the id, so a stream
/// never depends on how many other bugs exist.
pub struct AgentRngs {
    seed:  u64,
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: Vec::new() }
    }

    /// Mutable reference to one bug's RNG, seeding any missing streams.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        let idx = agent.index();
        while self.inner.len() <= idx {
            let next = AgentId(self.inner.len() as u32);
            self.inner.push(AgentRng::new(self.seed, next));
        }
        &mut self.inner[idx]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── BugStore ──────────────────────────────────────────────────────────────────

/// The live, ordered bug collection.
#[derive(Clone, Debug, Default)]
pub struct BugStore {
    slots: Vec<Option<Bug>>,
    live:  usize,
}

impl BugStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), live: 0 }
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// The id the next inserted bug will receive.
    #[inline]
    pub fn next_id(&self) -> AgentId {
        AgentId(self.slots.len() as u32)
    }

    /// Insert a bug built by `make` from its freshly assigned id.
    pub fn push_with(&mut self, make: impl FnOnce(AgentId) -> Bug) -> AgentId {
        let id = self.next_id();
        let bug = make(id);
        debug_assert_eq!(bug.id, id, "bug built with a foreign id");
        self.slots.push(Some(bug));
        self.live += 1;
        id
    }

    /// Insert a bug at `position`, as an anchor or as a lost bug.
    pub fn add(&mut self, position: Vec2, anchor: bool) -> AgentId {
        self.push_with(|id| {
            if anchor { Bug::anchor(id, position) } else { Bug::lost(id, position) }
        })
    }

    /// Remove a bug permanently.  Returns `None` if it was already gone.
    pub fn remove(&mut self, agent: AgentId) -> Option<Bug> {
        let removed = self.slots.get_mut(agent.index())?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Remove the bug at logical position `index` (0 = first live bug in
    /// collection order).
    pub fn remove_at(&mut self, index: usize) -> Option<Bug> {
        let id = self.iter().nth(index)?.id;
        self.remove(id)
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Bug> {
        self.slots.get(agent.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Bug> {
        self.slots.get_mut(agent.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.get(agent).is_some()
    }

    /// Number of live bugs.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of ids ever issued (live + removed).
    #[inline]
    pub fn issued(&self) -> usize {
        self.slots.len()
    }

    /// Live bugs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Bug> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bug> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Snapshot of the live ids in collection order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(|b| b.id).collect()
    }
}
