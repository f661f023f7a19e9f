use std::fmt;
use std::str::FromStr;

/// Inclusive, 1-based range of lines as understood by GitLab's `#L<start>-<end>` anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start_line: u32,
    pub end_line: u32,
}

impl SelectionRange {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}-{}", self.start_line, self.end_line)
    }
}

impl FromStr for SelectionRange {
    type Err = String;

    /// Parses `10` or `10-12`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_line = |part: &str| -> Result<u32, String> {
            match part.trim().parse::<u32>() {
                Ok(0) => Err("line numbers start at 1".to_string()),
                Ok(line) => Ok(line),
                Err(_) => Err(format!("invalid line number '{}'", part.trim())),
            }
        };

        match value.split_once('-') {
            Some((start, end)) => {
                let start = parse_line(start)?;
                let end = parse_line(end)?;
                if end < start {
                    return Err(format!("line range {start}-{end} is inverted"));
                }
                Ok(Self::new(start, end))
            }
            None => parse_line(value).map(Self::single),
        }
    }
}

/// Maps a selection given as offsets to the lines it covers.
///
/// `line_of_offset` and `line_start_offset` are 0-based. When the selection ends
/// exactly at the start of a line, that line holds no selected character and is
/// not reported. Inverted selections are passed through as-is.
pub fn map_selection<L, S>(
    selection_start: usize,
    selection_end: usize,
    line_of_offset: L,
    line_start_offset: S,
    total_lines: usize,
) -> Option<SelectionRange>
where
    L: Fn(usize) -> usize,
    S: Fn(usize) -> usize,
{
    if total_lines < 1 {
        return None;
    }

    let begin = line_of_offset(selection_start) + 1;
    let mut end = line_of_offset(selection_end) + 1;
    if line_start_offset(end - 1) == selection_end {
        end -= 1;
    }

    Some(SelectionRange::new(begin as u32, end as u32))
}

/// Line start offsets of a text document, counted in characters.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.chars()
                .enumerate()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(idx, _)| idx + 1),
        );

        Self {
            line_starts,
            len: text.chars().count(),
        }
    }

    /// Index that has no line at all.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            line_starts: vec![],
            len: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-based line containing `offset`; offsets past the end land on the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_at) => insert_at.saturating_sub(1),
        }
    }

    pub fn line_start_offset(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.len)
    }

    pub fn map_selection(&self, start: usize, end: usize) -> Option<SelectionRange> {
        map_selection(
            start,
            end,
            |offset| self.line_of_offset(offset),
            |line| self.line_start_offset(line),
            self.line_count(),
        )
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
