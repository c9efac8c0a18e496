//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Pages of selectable items and the sources that produce them.

use crate::error::{Error, Result};

/// One batch of items with a selection mask of the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    selected: Vec<bool>,
}

impl<T> Page<T> {
    /// A page with nothing selected.
    pub fn new(items: Vec<T>) -> Self {
        let selected = vec![false; items.len()];
        Self { items, selected }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> &[bool] {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Replace the whole mask. `number` only labels the error.
    pub fn set_selection(&mut self, number: usize, mask: Vec<bool>) -> Result<()> {
        if mask.len() != self.items.len() {
            return Err(Error::SelectionLength {
                page: number,
                mask: mask.len(),
                items: self.items.len(),
            });
        }
        self.selected = mask;
        Ok(())
    }

    /// Flip one entry; out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected.iter().all(|&s| s)
    }

    /// Clear everything if everything is selected, otherwise select all.
    pub fn toggle_all(&mut self) {
        let value = !self.is_all_selected();
        self.selected.iter_mut().for_each(|s| *s = value);
    }

    /// Set every entry to `value`.
    pub fn fill(&mut self, value: bool) {
        self.selected.iter_mut().for_each(|s| *s = value);
    }

    /// Consume the page into `(item, selected)` pairs in item order.
    pub fn into_pairs(self) -> impl Iterator<Item = (T, bool)> {
        self.items.into_iter().zip(self.selected)
    }
}

/// A source of pages, numbered from 1.
///
/// The selector asks for each page at most once and keeps the result,
/// so implementations may produce pages lazily and need not cache.
pub trait Pager {
    type Item;

    /// Produce the items of page `number` (1-based, within `1..=max_page`).
    fn flip(&mut self, number: usize) -> Result<Vec<Self::Item>>;

    /// Highest valid page number.
    fn max_page(&self) -> usize;
}

/// The degenerate pager: one page holding every item.
pub struct SinglePager<T> {
    items: Option<Vec<T>>,
}

impl<T> SinglePager<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items: Some(items) }
    }
}

impl<T> Pager for SinglePager<T> {
    type Item = T;

    fn flip(&mut self, _number: usize) -> Result<Vec<T>> {
        Ok(self.items.take().unwrap_or_default())
    }

    fn max_page(&self) -> usize {
        1
    }
}

/// Splits an owned list into pages of a fixed size.
pub struct ChunkPager<T> {
    chunks: Vec<Option<Vec<T>>>,
}

impl<T> ChunkPager<T> {
    /// Pages of `per_page` items (at least 1); an empty list still has
    /// one, empty, page.
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let mut chunks = Vec::new();
        let mut rest = items.into_iter().peekable();
        while rest.peek().is_some() {
            chunks.push(Some(rest.by_ref().take(per_page).collect()));
        }
        if chunks.is_empty() {
            chunks.push(Some(Vec::new()));
        }
        Self { chunks }
    }
}

impl<T> Pager for ChunkPager<T> {
    type Item = T;

    fn flip(&mut self, number: usize) -> Result<Vec<T>> {
        Ok(number
            .checked_sub(1)
            .and_then(|i| self.chunks.get_mut(i))
            .and_then(Option::take)
            .unwrap_or_default())
    }

    fn max_page(&self) -> usize {
        self.chunks.len()
    }
}

/// Pager backed by a closure, for pages computed on demand.
pub struct FnPager<F> {
    max_page: usize,
    produce: F,
}

impl<T, F> FnPager<F>
where
    F: FnMut(usize) -> Result<Vec<T>>,
{
    pub fn new(max_page: usize, produce: F) -> Self {
        Self { max_page, produce }
    }
}

impl<T, F> Pager for FnPager<F>
where
    F: FnMut(usize) -> Result<Vec<T>>,
{
    type Item = T;

    fn flip(&mut self, number: usize) -> Result<Vec<T>> {
        (self.produce)(number)
    }

    fn max_page(&self) -> usize {
        self.max_page
    }
}
