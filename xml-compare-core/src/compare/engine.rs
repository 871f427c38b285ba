//! The comparison walk.
//!
//! A comparison is a stack of node-pair frames. Each frame moves through
//! three stages (namespaces, attributes, children); matching an element child
//! pushes a new frame, so descent follows document order and stops as soon as
//! the caller stops pulling differences.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::compare::difference::{Difference, DifferenceSource};
use crate::compare::error::{CompareError, Side};
use crate::compare::matcher::Matcher;
use crate::compare::options::CompareOptions;
use crate::tree::{Node, NodeKind};

/// Prefix and local name reserved for namespace declarations.
const XMLNS: &str = "xmlns";

/// Compares node trees under a fixed set of [`CompareOptions`].
///
/// ```
/// use xml_compare_core::{parse, CompareOptions, Comparer};
///
/// let left = parse(br#"<foo a="1" b="2"/>"#).unwrap();
/// let right = parse(br#"<foo b="2" a="1"/>"#).unwrap();
///
/// let comparer = Comparer::new(CompareOptions {
///     ignore_attribute_order: true,
///     ..CompareOptions::default()
/// });
/// assert!(comparer.is_equivalent(Some(&left), Some(&right)).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparer {
    options: CompareOptions,
}

impl Comparer {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    /// Start comparing `left` against `right`.
    ///
    /// Argument and kind checks for the two roots happen here; everything
    /// else is done lazily as the returned iterator is consumed.
    pub fn compare<'a, N: Node>(
        &self,
        left: Option<&'a N>,
        right: Option<&'a N>,
    ) -> Result<Differences<'a, N>, CompareError> {
        let left = left.ok_or(CompareError::InvalidArgument(Side::Left))?;
        let right = right.ok_or(CompareError::InvalidArgument(Side::Right))?;
        ensure_comparable(left, right)?;

        debug!(kind = %left.kind(), name = left.local_name(), "starting comparison");
        Ok(Differences {
            options: self.options,
            pending: VecDeque::new(),
            stack: vec![Frame {
                left,
                right,
                stage: Stage::Namespaces,
            }],
        })
    }

    /// Whether the two trees have no differences. Stops at the first one found.
    pub fn is_equivalent<N: Node>(
        &self,
        left: Option<&N>,
        right: Option<&N>,
    ) -> Result<bool, CompareError> {
        match self.compare(left, right)?.next() {
            None => Ok(true),
            Some(Ok(_)) => Ok(false),
            Some(Err(err)) => Err(err),
        }
    }

    /// Collect every difference, failing if the walk hits an error.
    pub fn differences<N: Node>(
        &self,
        left: Option<&N>,
        right: Option<&N>,
    ) -> Result<Vec<Difference>, CompareError> {
        self.compare(left, right)?.collect()
    }
}

/// Differences between two trees, produced on demand.
///
/// Yields namespace, attribute, then child differences for each node pair,
/// with differences inside a matched element child emitted where that child
/// sits. After an `Err` the iterator is exhausted.
pub struct Differences<'a, N> {
    options: CompareOptions,
    pending: VecDeque<Difference>,
    stack: Vec<Frame<'a, N>>,
}

struct Frame<'a, N> {
    left: &'a N,
    right: &'a N,
    stage: Stage<'a, N>,
}

enum Stage<'a, N> {
    /// Recursive entry; the kind check has not run yet.
    Entry,
    Namespaces,
    Attributes(Matcher<'a, N>),
    Children(Matcher<'a, N>),
}

impl<'a, N: Node> Differences<'a, N> {
    /// Advance the top frame by one unit of work.
    fn step(&mut self) -> Result<(), CompareError> {
        let opts = self.options;
        let Some(frame) = self.stack.last_mut() else {
            return Ok(());
        };
        let (left, right) = (frame.left, frame.right);
        let mut descend = None;
        let mut finished = false;

        match &mut frame.stage {
            Stage::Entry => {
                ensure_comparable(left, right)?;
                frame.stage = Stage::Namespaces;
            }
            Stage::Namespaces => {
                if !opts.ignore_namespace {
                    self.pending.extend(value_difference(
                        DifferenceSource::NamespaceUri,
                        left.namespace_uri(),
                        right.namespace_uri(),
                    ));
                }
                if !opts.ignore_prefix {
                    self.pending.extend(value_difference(
                        DifferenceSource::NamespacePrefix,
                        left.prefix(),
                        right.prefix(),
                    ));
                }
                frame.stage = Stage::Attributes(Matcher::new(
                    comparable_attributes(left),
                    comparable_attributes(right),
                ));
            }
            Stage::Attributes(matcher) => match matcher.next_left() {
                Some(l) => {
                    let candidate = if opts.ignore_attribute_order {
                        matcher.take_by_name(l.local_name())
                    } else {
                        matcher.take_positional()
                    };
                    match candidate {
                        Some(r) => attribute_pair(l, r, &mut self.pending),
                        None => self.pending.push_back(Difference::removed(
                            DifferenceSource::AttributeName,
                            l.local_name(),
                        )),
                    }
                }
                None => {
                    for r in matcher.unmatched_right() {
                        self.pending.push_back(Difference::added(
                            DifferenceSource::AttributeName,
                            r.local_name(),
                        ));
                    }
                    frame.stage = Stage::Children(Matcher::new(
                        comparable_children(left, &opts),
                        comparable_children(right, &opts),
                    ));
                }
            },
            Stage::Children(matcher) => match matcher.next_left() {
                Some(l) => {
                    let candidate =
                        if opts.ignore_child_node_order && !l.local_name().trim().is_empty() {
                            matcher.take_by_name(l.local_name())
                        } else {
                            matcher.take_positional()
                        };
                    match candidate {
                        Some(r) => descend = child_pair(l, r, &mut self.pending)?,
                        None => self.pending.push_back(Difference::removed(
                            DifferenceSource::ChildNode,
                            l.local_name(),
                        )),
                    }
                }
                None => {
                    for r in matcher.unmatched_right() {
                        self.pending.push_back(Difference::added(
                            DifferenceSource::ChildNode,
                            r.local_name(),
                        ));
                    }
                    finished = true;
                }
            },
        }

        if finished {
            self.stack.pop();
        }
        if let Some((left, right)) = descend {
            trace!(
                depth = self.stack.len(),
                name = left.local_name(),
                "descending into element pair"
            );
            self.stack.push(Frame {
                left,
                right,
                stage: Stage::Entry,
            });
        }
        Ok(())
    }
}

impl<N: Node> Iterator for Differences<'_, N> {
    type Item = Result<Difference, CompareError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(diff) = self.pending.pop_front() {
                return Some(Ok(diff));
            }
            if self.stack.is_empty() {
                return None;
            }
            if let Err(err) = self.step() {
                self.stack.clear();
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

impl<N: Node> FusedIterator for Differences<'_, N> {}

fn ensure_comparable<N: Node>(left: &N, right: &N) -> Result<(), CompareError> {
    if left.kind() != right.kind() {
        return Err(CompareError::Uncomparable {
            left: left.kind(),
            right: right.kind(),
        });
    }
    Ok(())
}

/// Presence/equality check shared by namespace URI and prefix. Empty counts as absent.
fn value_difference(
    source: DifferenceSource,
    left: Option<&str>,
    right: Option<&str>,
) -> Option<Difference> {
    let left = left.filter(|v| !v.is_empty());
    let right = right.filter(|v| !v.is_empty());
    match (left, right) {
        (Some(l), None) => Some(Difference::removed(source, l)),
        (None, Some(r)) => Some(Difference::added(source, r)),
        (Some(l), Some(r)) if l != r => Some(Difference::changed(source, Some(l), Some(r))),
        _ => None,
    }
}

fn comparable_attributes<N: Node>(node: &N) -> Vec<&N> {
    node.attributes()
        .iter()
        .filter(|attr| attr.prefix() != Some(XMLNS) && attr.local_name() != XMLNS)
        .collect()
}

fn comparable_children<'a, N: Node>(node: &'a N, opts: &CompareOptions) -> Vec<&'a N> {
    node.children()
        .iter()
        .filter(|child| is_allowed_child(child.kind(), opts))
        .collect()
}

fn is_allowed_child(kind: NodeKind, opts: &CompareOptions) -> bool {
    match kind {
        NodeKind::Element | NodeKind::Text => true,
        NodeKind::Comment => !opts.ignore_comments,
        NodeKind::CData => !opts.ignore_cdata,
        _ => false,
    }
}

fn attribute_pair<N: Node>(l: &N, r: &N, out: &mut VecDeque<Difference>) {
    if l.local_name() != r.local_name() {
        out.push_back(Difference::changed(
            DifferenceSource::AttributeName,
            Some(l.local_name()),
            Some(r.local_name()),
        ));
    }
    if l.value() != r.value() {
        out.push_back(Difference::changed(
            DifferenceSource::AttributeValue,
            l.value(),
            r.value(),
        ));
    }
}

/// Compare a matched child pair. Returns the pair when it must be descended into.
fn child_pair<'a, N: Node>(
    l: &'a N,
    r: &'a N,
    out: &mut VecDeque<Difference>,
) -> Result<Option<(&'a N, &'a N)>, CompareError> {
    match l.kind() {
        NodeKind::Element => {
            // Only reachable with positional matching.
            if l.local_name() != r.local_name() {
                out.push_back(Difference::changed(
                    DifferenceSource::ChildNode,
                    Some(l.local_name()),
                    Some(r.local_name()),
                ));
            }
            Ok(Some((l, r)))
        }
        NodeKind::Text | NodeKind::CData | NodeKind::Comment => {
            if l.value() != r.value() {
                out.push_back(Difference::changed(
                    DifferenceSource::ChildNode,
                    l.value(),
                    r.value(),
                ));
            }
            Ok(None)
        }
        other => Err(CompareError::UnsupportedNodeKind(other)),
    }
}
