//! The control-driven walk behind [`descend`] and [`descents`].
//!
//! The walk keeps an explicit stack of frames, one per level, over a single
//! path buffer. Each frame holds the remaining candidates of its level and
//! the slice of the buffer that forms the path visible to that level.
//! Expansion of an element into its children is deferred until the consumer
//! asks for the next item, so a consumer that stops early never pays for
//! subtrees it did not reach.

use super::failsafe::{Checkpoint, DescentConfig, Failsafe, FailsafeAction};
use crate::traversal::Route;

/// Decision taken for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Yield the element.
    pub emit: bool,
    /// Expand the element's children.
    pub descend: bool,
    /// Keep visiting the element's siblings afterwards.
    pub continue_siblings: bool,
    /// Give the children an empty path instead of extending it.
    pub reset_path: bool,
}

impl Instruction {
    const fn preset(emit: bool, descend: bool, continue_siblings: bool) -> Self {
        Self {
            emit,
            descend,
            continue_siblings,
            reset_path: false,
        }
    }

    /// Emit, descend, continue.
    pub const EMIT_AND_CONTINUE: Self = Self::preset(true, true, true);
    /// Emit and continue without descending.
    pub const EMIT: Self = Self::preset(true, false, true);
    /// Emit and descend, then stop this level.
    pub const EMIT_AND_CHAIN: Self = Self::preset(true, true, false);
    /// Emit, then stop this level.
    pub const EMIT_AND_CUT: Self = Self::preset(true, false, false);
    /// Descend and continue without emitting.
    pub const CONTINUE: Self = Self::preset(false, true, true);
    /// Descend, then stop this level.
    pub const CHAIN: Self = Self::preset(false, true, false);
    /// Skip the element.
    pub const IGNORE: Self = Self::preset(false, false, true);
    /// Skip the element and stop this level.
    pub const CUT: Self = Self::preset(false, false, false);

    /// The same instruction, with children starting from an empty path.
    #[must_use]
    pub const fn reset_path(self) -> Self {
        Self {
            reset_path: true,
            ..self
        }
    }
}

impl Default for Instruction {
    fn default() -> Self {
        Self::EMIT_AND_CONTINUE
    }
}

pub(crate) type Control<'a, T> = Box<dyn FnMut(&[T], &T) -> Instruction + 'a>;
pub(crate) type Children<'a, T> = Box<dyn FnMut(&[T], &T) -> Route<'a, T> + 'a>;

struct Frame<'a, T> {
    candidates: Route<'a, T>,
    /// First buffer index of this level's path.
    start: usize,
    /// Buffer length to restore when the frame is popped.
    mark: usize,
    /// Set once an element told this level to stop.
    halted: bool,
}

struct Expansion<T> {
    element: T,
    instruction: Instruction,
}

/// Engine state shared by [`Descend`] and [`Descents`].
struct Walk<'a, T> {
    control: Control<'a, T>,
    children: Children<'a, T>,
    max_depth: Option<usize>,
    failsafe: Failsafe<T>,
    path: Vec<T>,
    stack: Vec<Frame<'a, T>>,
    pending: Option<Expansion<T>>,
    fruitless: u64,
    finished: bool,
}

impl<'a, T: Clone + 'a> Walk<'a, T> {
    fn new(
        path: Vec<T>,
        control: Control<'a, T>,
        children: Children<'a, T>,
        config: DescentConfig<T>,
        start: Route<'a, T>,
    ) -> Self {
        let (max_depth, failsafe) = config.into_parts();
        let mark = path.len();
        Self {
            control,
            children,
            max_depth,
            failsafe,
            path,
            stack: vec![Frame {
                candidates: start,
                start: 0,
                mark,
                halted: false,
            }],
            pending: None,
            fruitless: 0,
            finished: false,
        }
    }

    /// Path visible to the current level.
    fn current_path(&self) -> &[T] {
        let start = self.stack.last().map_or(self.path.len(), |frame| frame.start);
        &self.path[start..]
    }

    fn expand(&mut self, expansion: Expansion<T>) {
        let Expansion {
            element,
            instruction,
        } = expansion;
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        if !instruction.continue_siblings {
            frame.halted = true;
        }
        if !instruction.descend {
            return;
        }
        let start = frame.start;
        let child_len = if instruction.reset_path {
            0
        } else {
            self.path.len() - start + 1
        };
        if self.max_depth.is_some_and(|max| child_len > max) {
            return;
        }
        let candidates = (self.children)(&self.path[start..], &element);
        let mark = self.path.len();
        self.path.push(element);
        let child_start = if instruction.reset_path {
            self.path.len()
        } else {
            start
        };
        self.stack.push(Frame {
            candidates,
            start: child_start,
            mark,
            halted: false,
        });
    }

    fn pop(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.path.truncate(frame.mark);
        }
    }

    /// Advances to the next emitted element.
    fn next_emitted(&mut self) -> Option<T> {
        loop {
            if self.finished {
                return None;
            }
            if let Some(expansion) = self.pending.take() {
                self.expand(expansion);
            }
            let Some(frame) = self.stack.last_mut() else {
                self.finished = true;
                return None;
            };
            if frame.halted {
                self.pop();
                continue;
            }
            let Some(element) = frame.candidates.next() else {
                self.pop();
                continue;
            };
            let start = frame.start;

            let mut instruction = (self.control)(&self.path[start..], &element);
            if instruction.emit {
                self.fruitless = 0;
            } else {
                self.fruitless += 1;
                if self.failsafe.fires_at(self.fruitless) {
                    let checkpoint = Checkpoint {
                        depth: self.stack.len(),
                        path: &self.path[start..],
                        element: &element,
                        fruitless: self.fruitless,
                    };
                    match self.failsafe.trip(&checkpoint) {
                        FailsafeAction::Descend => {}
                        FailsafeAction::Advance => instruction = Instruction::CUT,
                        FailsafeAction::Substitute(value) => {
                            self.finished = true;
                            return Some(value);
                        }
                        FailsafeAction::Stop => {
                            self.finished = true;
                            return None;
                        }
                    }
                }
            }

            if instruction.emit {
                if instruction.descend || !instruction.continue_siblings {
                    self.pending = Some(Expansion {
                        element: element.clone(),
                        instruction,
                    });
                }
                return Some(element);
            }
            self.expand(Expansion {
                element,
                instruction,
            });
        }
    }
}

/// Lazy descent yielding emitted elements. Created by [`descend`] or
/// [`Descent::descend`].
pub struct Descend<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T: Clone + 'a> Iterator for Descend<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.walk.next_emitted()
    }
}

/// Lazy descent yielding `path ++ [element]` for each emitted element.
/// Created by [`descents`] or [`Descent::descents`].
pub struct Descents<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T: Clone + 'a> Iterator for Descents<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let element = self.walk.next_emitted()?;
        let mut path = self.walk.current_path().to_vec();
        path.push(element);
        Some(path)
    }
}

/// Builder for a descent.
///
/// ```rust
/// use pathweave_core::descend::{Descent, Instruction};
///
/// // Collatz steps from 6, stopping at 1
/// let steps: Vec<u64> = Descent::new(|_: &[u64], n: &u64| match *n {
///     1 => None,
///     n if n % 2 == 0 => Some(n / 2),
///     n => Some(3 * n + 1),
/// })
/// .descend(Some(6))
/// .collect();
/// assert_eq!(steps, vec![6, 3, 10, 5, 16, 8, 4, 2, 1]);
///
/// // Only the end of each chain
/// let ends: Vec<Vec<u64>> = Descent::new(|_: &[u64], n: &u64| (*n > 1).then(|| n / 2))
///     .control(|_, n| if *n == 1 { Instruction::EMIT } else { Instruction::CONTINUE })
///     .descents(vec![4, 3])
///     .collect();
/// assert_eq!(ends, vec![vec![4, 2, 1], vec![3, 1]]);
/// ```
pub struct Descent<'a, T> {
    path: Vec<T>,
    control: Control<'a, T>,
    children: Children<'a, T>,
    config: DescentConfig<T>,
}

impl<'a, T: Clone + 'a> Descent<'a, T> {
    /// Starts a descent whose elements expand through `children`.
    pub fn new<F, I>(mut children: F) -> Self
    where
        F: FnMut(&[T], &T) -> I + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            path: Vec::new(),
            control: Box::new(|_: &[T], _: &T| Instruction::EMIT_AND_CONTINUE),
            children: Box::new(move |path: &[T], element: &T| -> Route<'a, T> {
                Box::new(children(path, element).into_iter())
            }),
            config: DescentConfig::new(),
        }
    }

    /// Builder: set the decision function.
    #[must_use]
    pub fn control<C>(mut self, control: C) -> Self
    where
        C: FnMut(&[T], &T) -> Instruction + 'a,
    {
        self.control = Box::new(control);
        self
    }

    /// Builder: set the path the starting elements are reached through.
    #[must_use]
    pub fn path<P: IntoIterator<Item = T>>(mut self, path: P) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    /// Builder: set depth bound and failsafe.
    #[must_use]
    pub fn config(mut self, config: DescentConfig<T>) -> Self {
        self.config = config;
        self
    }

    fn into_walk<R>(self, start: R) -> Walk<'a, T>
    where
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
    {
        Walk::new(
            self.path,
            self.control,
            self.children,
            self.config,
            Box::new(start.into_iter()),
        )
    }

    /// Walks from `start`, yielding emitted elements.
    pub fn descend<R>(self, start: R) -> Descend<'a, T>
    where
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
    {
        Descend {
            walk: self.into_walk(start),
        }
    }

    /// Walks from `start`, yielding the path to each emitted element.
    pub fn descents<R>(self, start: R) -> Descents<'a, T>
    where
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
    {
        Descents {
            walk: self.into_walk(start),
        }
    }
}

/// Walks from `start` under `control`, expanding through `children`, and
/// yields every emitted element.
pub fn descend<'a, T, P, C, F, I, R>(
    path: P,
    control: C,
    children: F,
    start: R,
) -> Descend<'a, T>
where
    T: Clone + 'a,
    P: IntoIterator<Item = T>,
    C: FnMut(&[T], &T) -> Instruction + 'a,
    F: FnMut(&[T], &T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    Descent::new(children)
        .path(path)
        .control(control)
        .descend(start)
}

/// Like [`descend`], yielding `path ++ [element]` for each emitted element.
pub fn descents<'a, T, P, C, F, I, R>(
    path: P,
    control: C,
    children: F,
    start: R,
) -> Descents<'a, T>
where
    T: Clone + 'a,
    P: IntoIterator<Item = T>,
    C: FnMut(&[T], &T) -> Instruction + 'a,
    F: FnMut(&[T], &T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    Descent::new(children)
        .path(path)
        .control(control)
        .descents(start)
}
