use std::collections::{HashMap, VecDeque};

use slotmap::SlotMap;
use tracing::trace;

use crate::error::{Result, SetError};
use crate::geometry::Polyline;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Identifier of a polyline inside a [`PolylineSet`].
    pub struct PolylineId;
}

/// Exact, hashable form of a point. `-0.0` and `0.0` map to the same key so
/// hashing agrees with `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(u64, u64);

impl From<Point2> for PointKey {
    fn from(p: Point2) -> Self {
        let bits = |v: f64| if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() };
        Self(bits(p.x), bits(p.y))
    }
}

/// Incrementally assembles directed segments into polylines.
///
/// Each segment either starts a new polyline, extends one at its tail or
/// head, joins two polylines, or closes a polyline into a loop. Endpoints
/// are matched by exact coordinate equality and direction is preserved:
/// `v0` only joins a tail and `v1` only joins a head, so loops keep the
/// winding of the segments that built them.
///
/// Closed polylines (first point equal to last) have no open ends and never
/// take part in further joins.
///
/// The set is single-writer; wrap it in a lock to share it across threads.
#[derive(Debug, Default)]
pub struct PolylineSet {
    lines: SlotMap<PolylineId, VecDeque<Point2>>,
    /// Live polylines in creation order; joins remove the absorbed one.
    order: Vec<PolylineId>,
    heads: HashMap<PointKey, Vec<PolylineId>>,
    tails: HashMap<PointKey, Vec<PolylineId>>,
}

impl PolylineSet {
    /// Creates a new, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the directed segment `v0 → v1`.
    ///
    /// Zero-length segments are ignored.
    pub fn collect_segment(&mut self, v0: Point2, v1: Point2) {
        if v0 == v1 {
            trace!(?v0, "ignored zero-length segment");
            return;
        }

        let before = first_match(&self.tails, v0);
        let after = first_match(&self.heads, v1);

        match (before, after) {
            (Some(b), Some(a)) if a == b => {
                self.modify(b, |line| line.push_back(v1));
                trace!(?b, "closed polyline");
            }
            (Some(b), Some(a)) => self.join(b, a),
            (Some(b), None) => self.modify(b, |line| line.push_back(v1)),
            (None, Some(a)) => self.modify(a, |line| line.push_front(v0)),
            (None, None) => {
                let id = self.lines.insert(VecDeque::from([v0, v1]));
                self.order.push(id);
                self.index(id);
            }
        }
    }

    /// Number of polylines currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns a copy of the polyline at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SetError::OutOfBounds` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<Polyline> {
        self.order
            .get(index)
            .and_then(|&id| self.lines.get(id))
            .map(materialize)
            .ok_or_else(|| {
                SetError::OutOfBounds {
                    index,
                    len: self.len(),
                }
                .into()
            })
    }

    /// Iterates over copies of the polylines in creation order.
    pub fn iter(&self) -> impl Iterator<Item = Polyline> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.lines.get(id))
            .map(materialize)
    }

    /// Consumes the set, returning its polylines in creation order.
    #[must_use]
    pub fn into_polylines(mut self) -> Vec<Polyline> {
        self.order
            .iter()
            .filter_map(|&id| self.lines.remove(id))
            .map(|line| Polyline::new(line.into()))
            .collect()
    }

    /// Appends `after` to the tail of `before` and drops `after`.
    fn join(&mut self, before: PolylineId, after: PolylineId) {
        self.unindex(after);
        let Some(tail) = self.lines.remove(after) else {
            return;
        };
        self.order.retain(|&id| id != after);
        self.modify(before, |line| line.extend(tail));
        trace!(?before, ?after, "joined polylines");
    }

    /// Applies `f` to a polyline, keeping the endpoint index in sync.
    fn modify(&mut self, id: PolylineId, f: impl FnOnce(&mut VecDeque<Point2>)) {
        self.unindex(id);
        if let Some(line) = self.lines.get_mut(id) {
            f(line);
        }
        self.index(id);
    }

    /// Registers the endpoints of an open polyline.
    fn index(&mut self, id: PolylineId) {
        let Some((head, tail)) = self.lines.get(id).and_then(open_ends) else {
            return;
        };
        self.heads.entry(head).or_default().push(id);
        self.tails.entry(tail).or_default().push(id);
    }

    fn unindex(&mut self, id: PolylineId) {
        let Some((head, tail)) = self.lines.get(id).and_then(open_ends) else {
            return;
        };
        remove_entry(&mut self.heads, head, id);
        remove_entry(&mut self.tails, tail, id);
    }
}

impl Extend<(Point2, Point2)> for PolylineSet {
    fn extend<I: IntoIterator<Item = (Point2, Point2)>>(&mut self, iter: I) {
        for (v0, v1) in iter {
            self.collect_segment(v0, v1);
        }
    }
}

impl FromIterator<(Point2, Point2)> for PolylineSet {
    fn from_iter<I: IntoIterator<Item = (Point2, Point2)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

fn materialize(line: &VecDeque<Point2>) -> Polyline {
    line.iter().copied().collect()
}

/// Head and tail keys of a polyline that is not closed.
fn open_ends(line: &VecDeque<Point2>) -> Option<(PointKey, PointKey)> {
    let (&head, &tail) = (line.front()?, line.back()?);
    if line.len() > 1 && head == tail {
        return None;
    }
    Some((head.into(), tail.into()))
}

fn first_match(index: &HashMap<PointKey, Vec<PolylineId>>, p: Point2) -> Option<PolylineId> {
    index.get(&p.into()).and_then(|ids| ids.first().copied())
}

fn remove_entry(index: &mut HashMap<PointKey, Vec<PolylineId>>, key: PointKey, id: PolylineId) {
    if let Some(ids) = index.get_mut(&key) {
        ids.retain(|&other| other != id);
        if ids.is_empty() {
            index.remove(&key);
        }
    }
}
