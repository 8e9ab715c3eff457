//! The [`States`] manager.
//!
//! Every state lives in the manager's arena and is referred to by a
//! [`StateRef`] handle. Combinators can only be built from handles that the
//! manager has already issued, so operands always precede the combinator in
//! the arena and a combinator can never outlive its operands.
//!
//! The arena is hash-consed: building a structurally equal state twice returns
//! the same handle. States are never removed, so a manager grows with every
//! distinct state built through it; use a separate manager for scratch work.
//!
//! ```
//! use state_sampler::states::States;
//!
//! let states = States::new();
//! let one = states.mk_discrete(1);
//! let seg = states.mk_segment(0, 10);
//!
//! // Values of `seg` that are not `one`:
//! let diff = states.apply_difference(one, seg).unwrap();
//! assert!(states.contains(diff, 0));
//! assert!(!states.contains(diff, 1));
//! assert!(!states.contains(diff, 11));
//! ```

use std::cell::RefCell;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::BuildHasher;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::random::random_set;
use crate::reference::StateRef;
use crate::state::State;

#[derive(Default)]
pub struct States {
    storage: RefCell<Vec<State>>,
    /// Unique table: state hash -> handles with that hash.
    buckets: RefCell<HashMap<u64, Vec<StateRef>>>,
    hasher: RandomState,
}

impl States {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Debug for States {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("States").field("size", &self.len()).finish()
    }
}

impl States {
    /// Number of distinct states in the arena.
    pub fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.borrow().is_empty()
    }

    /// Returns `true` if `state` was issued by this manager.
    pub fn is_valid(&self, state: StateRef) -> bool {
        state.index() < self.len()
    }

    /// Returns a copy of the state behind the handle.
    pub fn get(&self, state: StateRef) -> Result<State> {
        self.storage
            .borrow()
            .get(state.index())
            .cloned()
            .ok_or(Error::UnknownState(state))
    }

    fn put(&self, state: State) -> StateRef {
        let hash = self.hasher.hash_one(&state);
        let mut storage = self.storage.borrow_mut();
        let mut buckets = self.buckets.borrow_mut();
        let bucket = buckets.entry(hash).or_default();

        if let Some(&existing) = bucket.iter().find(|r| storage[r.index()] == state) {
            debug!("put: reusing {} for {:?}", existing, state);
            return existing;
        }

        let index = u32::try_from(storage.len()).unwrap_or_else(|_| panic!("States arena is full"));
        let r = StateRef::new(index);
        debug!("put: new {} = {:?}", r, state);
        storage.push(state);
        bucket.push(r);
        r
    }

    fn check(&self, state: StateRef) -> Result<StateRef> {
        if self.is_valid(state) {
            Ok(state)
        } else {
            Err(Error::UnknownState(state))
        }
    }
}

impl States {
    pub fn mk_discrete(&self, value: i32) -> StateRef {
        self.put(State::Discrete(value))
    }

    /// Closed segment `[begin, end]`. Empty when `begin > end`.
    pub fn mk_segment(&self, begin: i32, end: i32) -> StateRef {
        self.put(State::segment(begin, end))
    }

    /// The empty segment `[0, -1]`, which contains nothing.
    pub fn mk_empty_segment(&self) -> StateRef {
        self.put(State::default())
    }

    pub fn mk_set(&self, values: impl IntoIterator<Item = i32>) -> StateRef {
        self.put(State::set(values))
    }

    /// Set of `draws` uniform values from `[min, max]`, seeded deterministically.
    ///
    /// Duplicate draws collapse, so the set may hold fewer than `draws` values.
    pub fn mk_random_set(&self, draws: usize, min: i32, max: i32, seed: u64) -> Result<StateRef> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values: BTreeSet<i32> = random_set(&mut rng, draws, min, max)?;
        Ok(self.put(State::Set(values)))
    }

    /// Values contained in both `a` and `b`.
    pub fn apply_intersection(&self, a: StateRef, b: StateRef) -> Result<StateRef> {
        debug!("apply_intersection(a = {}, b = {})", a, b);
        Ok(self.put(State::Intersection(self.check(a)?, self.check(b)?)))
    }

    /// Values contained in `a` or `b`.
    pub fn apply_union(&self, a: StateRef, b: StateRef) -> Result<StateRef> {
        debug!("apply_union(a = {}, b = {})", a, b);
        Ok(self.put(State::Union(self.check(a)?, self.check(b)?)))
    }

    /// Values contained in `b` but not in `a`.
    ///
    /// The first operand is the one being *removed*:
    ///
    /// ```text
    /// difference(a, b) = ¬a ∧ b
    /// ```
    pub fn apply_difference(&self, a: StateRef, b: StateRef) -> Result<StateRef> {
        debug!("apply_difference(a = {}, b = {})", a, b);
        Ok(self.put(State::Difference(self.check(a)?, self.check(b)?)))
    }
}

/// Pending work of the iterative evaluators.
enum Task {
    /// Evaluate the state at this handle.
    Visit(StateRef),
    /// Left operand is on the value stack; decide whether the right one is needed.
    Right(StateRef),
    /// Both operands are on the value stack; combine them.
    Combine(StateRef),
}

impl States {
    /// Membership test.
    ///
    /// Total over all `i32`; an unknown handle contains nothing. Evaluation
    /// uses an explicit work stack, so nesting depth is bounded only by memory.
    pub fn contains(&self, state: StateRef, x: i32) -> bool {
        let storage = self.storage.borrow();
        let Some(root) = storage.get(state.index()) else {
            return false;
        };
        if let Some(res) = root.leaf_contains(x) {
            return res;
        }

        let mut tasks = vec![Task::Visit(state)];
        let mut values: Vec<bool> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(r) => {
                    let s = &storage[r.index()];
                    if let Some(res) = s.leaf_contains(x) {
                        values.push(res);
                    } else if let Some((a, _)) = s.operands() {
                        tasks.push(Task::Right(r));
                        tasks.push(Task::Visit(a));
                    }
                }
                Task::Right(r) => {
                    let s = &storage[r.index()];
                    let left = values.last().copied().unwrap_or(false);
                    // Short-circuit where the right operand cannot change the result.
                    let decided = match (s, left) {
                        (State::Intersection(..), false) => Some(false),
                        (State::Union(..), true) => Some(true),
                        (State::Difference(..), true) => Some(false),
                        _ => None,
                    };
                    match (decided, s.operands()) {
                        (Some(res), _) => {
                            values.pop();
                            values.push(res);
                        }
                        (None, Some((_, b))) => {
                            tasks.push(Task::Combine(r));
                            tasks.push(Task::Visit(b));
                        }
                        (None, None) => unreachable!("leaf scheduled as combinator"),
                    }
                }
                Task::Combine(r) => {
                    let b = values.pop().unwrap_or(false);
                    let a = values.pop().unwrap_or(false);
                    values.push(storage[r.index()].combine(a, b).unwrap_or(false));
                }
            }
        }

        values.pop().unwrap_or(false)
    }

    /// All handles reachable from the given roots (roots included).
    pub fn descendants(&self, roots: impl IntoIterator<Item = StateRef>) -> HashSet<StateRef> {
        let storage = self.storage.borrow();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(roots);

        while let Some(r) = queue.pop_front() {
            let Some(state) = storage.get(r.index()) else {
                continue;
            };
            if visited.insert(r) {
                if let Some((a, b)) = state.operands() {
                    queue.push_back(a);
                    queue.push_back(b);
                }
            }
        }

        visited
    }

    /// Number of distinct states reachable from `state`.
    pub fn size(&self, state: StateRef) -> usize {
        self.descendants([state]).len()
    }

    /// Renders the state as a bracketed expression.
    ///
    /// Segments print as `[b..e]`, sets as `{..}`, and combinators as
    /// `(a & b)`, `(a | b)` and `(b \ a)` respectively.
    pub fn to_expr_string(&self, state: StateRef) -> String {
        let storage = self.storage.borrow();
        if storage.get(state.index()).is_none() {
            return format!("<unknown {}>", state);
        }

        let mut tasks = vec![Task::Visit(state)];
        let mut parts: Vec<String> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(r) => match &storage[r.index()] {
                    State::Discrete(v) => parts.push(v.to_string()),
                    State::Segment { begin, end } => parts.push(format!("[{}..{}]", begin, end)),
                    State::Set(values) => {
                        let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                        parts.push(format!("{{{}}}", items.join(", ")));
                    }
                    s => {
                        if let Some((a, b)) = s.operands() {
                            tasks.push(Task::Combine(r));
                            tasks.push(Task::Visit(b));
                            tasks.push(Task::Visit(a));
                        }
                    }
                },
                Task::Combine(r) => {
                    let b = parts.pop().unwrap_or_default();
                    let a = parts.pop().unwrap_or_default();
                    parts.push(match &storage[r.index()] {
                        State::Intersection(..) => format!("({} & {})", a, b),
                        State::Union(..) => format!("({} | {})", a, b),
                        _ => format!("({} \\ {})", b, a),
                    });
                }
                Task::Right(_) => unreachable!("rendering visits both operands"),
            }
        }

        parts.pop().unwrap_or_default()
    }
}
