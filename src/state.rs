// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::fmt;

// ===================================================================
// Operand Stack
// ===================================================================

/// The operand stack of the virtual machine: a LIFO of signed
/// integers with no capacity bound.  Operations which would reach
/// below the bottom return `None` and leave the stack untouched; the
/// executor turns that into a stack underflow fault.
#[derive(Debug, Default, PartialEq)]
pub struct OperandStack {
    items: Vec<i64>,
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack { items: Vec::new() }
    }

    /// Number of items currently on the stack.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// Push an item onto the stack.
    pub fn push(&mut self, item: i64) {
        self.items.push(item);
    }

    /// Pop the top item from the stack.
    pub fn pop(&mut self) -> Option<i64> {
        self.items.pop()
    }

    /// Read the item `n` positions below the top (`0` being the top)
    /// without removing it.
    pub fn peek(&self, n: usize) -> Option<i64> {
        if n < self.items.len() {
            Some(self.items[self.items.len() - 1 - n])
        } else {
            None
        }
    }
}

impl fmt::Display for OperandStack {
    /// Render the stack top first, as `[a,b,c]`.  Used by the
    /// execution trace.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

// ===================================================================
// Heap
// ===================================================================

/// The random-access heap of the virtual machine: a fixed-length
/// array of signed integers, all zero at construction.  Addresses are
/// nonnegative and below the heap length; anything else returns
/// `None` and the executor faults.  The heap never grows.
#[derive(Debug, PartialEq)]
pub struct Heap {
    cells: Vec<i64>,
}

impl Heap {
    /// Construct a heap of the given number of cells.
    pub fn new(size: usize) -> Self {
        Heap {
            cells: vec![0; size],
        }
    }

    /// Number of cells in the heap.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the cell at `address`, or `None` if the address is out of
    /// range.
    pub fn load(&self, address: i64) -> Option<i64> {
        self.cells.get(Self::index(address)?).copied()
    }

    /// Write `value` to the cell at `address`, or `None` if the
    /// address is out of range.
    #[must_use]
    pub fn store(&mut self, address: i64, value: i64) -> Option<()> {
        let cell = self.cells.get_mut(Self::index(address)?)?;
        *cell = value;
        Some(())
    }

    fn index(address: i64) -> Option<usize> {
        usize::try_from(address).ok()
    }
}
