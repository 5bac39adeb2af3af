use std::fmt::Write;

use crate::{
    iterator::{IterationStrategy, PreOrderIter, Traversal, TreeIter},
    NodeRef, Tree,
};

fn write_data<T, W>(out: &mut W, node: &NodeRef<T>) -> std::fmt::Result
where
    T: std::fmt::Display,
    W: Write,
{
    node.with_data(|data| match data {
        Some(data) => write!(out, "{}", data),
        None => out.write_str("null"),
    })
}

/// Renders a traversal as `[a, b, c]`
pub struct ListDisplay;

impl ListDisplay {
    pub fn format<T, W>(mut iter: TreeIter<T>, out: &mut W) -> std::fmt::Result
    where
        T: std::fmt::Display,
        W: Write,
    {
        out.write_char('[')?;

        if let Some(first) = iter.next_node() {
            write_data(out, &first)?;
            while let Some(node) = iter.next_node() {
                out.write_str(", ")?;
                write_data(out, &node)?;
            }
        }

        out.write_char(']')
    }
}

/// Renders a subtree with box drawing rails, one node per line
pub struct TreeDisplay;

impl TreeDisplay {
    pub fn format<T, W>(node: &NodeRef<T>, out: &mut W) -> std::fmt::Result
    where
        T: std::fmt::Display,
        W: Write,
    {
        let mut iter = PreOrderIter::new(node);

        // One entry per ancestor level, true while that ancestor has siblings
        // still to come
        let mut rails: Vec<bool> = Vec::new();

        while let Some(current) = iter.next_node() {
            let depth = iter.current_depth().unwrap_or(0);

            if depth > 0 {
                let last = current.is_last_child();

                rails.truncate(depth - 1);
                for rail in &rails {
                    out.write_str(if *rail { "┃ " } else { "  " })?;
                }
                out.write_str(if last { "┗ " } else { "┣ " })?;
                rails.push(!last);
            }

            write_data(out, &current)?;
            out.write_char('\n')?;
        }

        Ok(())
    }
}

impl<T> std::fmt::Display for NodeRef<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreeDisplay::format(self, f)
    }
}

impl<T> std::fmt::Display for Tree<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ListDisplay::format(self.iter(), f)
    }
}

impl<T> Tree<T>
where
    T: std::fmt::Display,
{
    /// Render the traversal of `node` in `strategy` as `[a, b, c]`
    pub fn to_string_with(&self, strategy: IterationStrategy, node: &NodeRef<T>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = ListDisplay::format(TreeIter::new(strategy, node), &mut out);
        out
    }

    /// Render the traversal from the root in `strategy`
    pub fn to_string_strategy(&self, strategy: IterationStrategy) -> String {
        match self.root_ref() {
            Some(root) => self.to_string_with(strategy, root),
            None => "[]".to_string(),
        }
    }
}
