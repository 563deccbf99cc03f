//! Positioned text on a PDF page.
//!
//! Walks a page's content operations, tracking the text and transformation
//! matrices, and records where each shown string starts. Runs sharing a
//! baseline form a line; consecutive multi-cell lines form a table whose
//! columns are anchored on the widest row.
//!
//! Glyph widths are not read from font programs. A shown string advances
//! the pen by an estimate of half an em per character, which is enough to
//! order strings and to tell a word gap from a column gap.

use lopdf::Object;
use lopdf::content::Operation;

use super::source::RawTable;

/// Estimated advance of one character, in ems.
const AVERAGE_GLYPH_WIDTH: f64 = 0.5;

/// Runs whose baselines differ by at most this many points share a line.
const BASELINE_TOLERANCE: f64 = 2.0;

/// A `TJ` adjustment wider than this (thousandths of an em) separates cells.
const TJ_CELL_GAP: f64 = 1000.0;

/// A gap narrower than this many ems joins two runs into one cell.
const WORD_GAP_EMS: f64 = 1.0;

/// A string shown at a point on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Start of the baseline, device space.
    pub x: f64,
    /// Baseline height, device space. Larger is higher on the page.
    pub y: f64,
    /// Font size in device units.
    pub size: f64,
    /// Decoded text.
    pub text: String,
}

impl TextRun {
    fn estimated_end(&self) -> f64 {
        self.x + char_count(&self.text) * self.size * AVERAGE_GLYPH_WIDTH
    }
}

type Matrix = [f64; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `a × b` in the PDF row-vector convention.
fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

const fn translation(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

#[allow(clippy::cast_precision_loss)]
fn char_count(text: &str) -> f64 {
    text.chars().count() as f64
}

#[allow(clippy::cast_precision_loss)]
fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

fn numbers<const N: usize>(operands: &[Object]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    if operands.len() < N {
        return None;
    }
    for (slot, operand) in out.iter_mut().zip(operands) {
        *slot = number(operand)?;
    }
    Some(out)
}

/// Decodes a string operand: UTF-16BE with a byte-order mark, otherwise one
/// character per byte.
fn decode(object: &Object) -> Option<String> {
    let Object::String(bytes, _) = object else {
        return None;
    };
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&units));
    }
    Some(bytes.iter().copied().map(char::from).collect())
}

/// Text-state interpreter for one content stream.
struct Interpreter {
    ctm: Matrix,
    saved: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f64,
    font_size: f64,
    runs: Vec<TextRun>,
}

impl Interpreter {
    fn new() -> Self {
        Self {
            ctm: IDENTITY,
            saved: Vec::new(),
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            leading: 0.0,
            font_size: 1.0,
            runs: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = numbers::<6>(operands) {
                    self.ctm = multiply(&m, &self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = IDENTITY;
                self.line_matrix = IDENTITY;
            }
            "Tf" => {
                if let Some(size) = operands.get(1).and_then(number) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some([leading]) = numbers::<1>(operands) {
                    self.leading = leading;
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    self.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = numbers::<6>(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(text) = operands.first().and_then(decode) {
                    self.show(&text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(text) = operands.first().and_then(decode) {
                    self.show(&text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(text) = operands.get(2).and_then(decode) {
                    self.show(&text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_adjusted(items);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = multiply(&translation(tx, ty), &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Advances the pen by `tx` unscaled text-space units.
    fn advance(&mut self, tx: f64) {
        self.text_matrix = multiply(&translation(tx, 0.0), &self.text_matrix);
    }

    fn show(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.advance(char_count(text) * self.font_size * AVERAGE_GLYPH_WIDTH);
            return;
        }
        let placed = multiply(&self.text_matrix, &self.ctm);
        // Font size scaled by the vertical extent of the combined matrix.
        let scale = placed[2].hypot(placed[3]);
        self.runs.push(TextRun {
            x: placed[4],
            y: placed[5],
            size: self.font_size * scale,
            text: text.to_string(),
        });
        self.advance(char_count(text) * self.font_size * AVERAGE_GLYPH_WIDTH);
    }

    /// Shows a `TJ` array. A wide rightward adjustment ends the current
    /// cell; narrower ones are kerning and stay inside it.
    fn show_adjusted(&mut self, items: &[Object]) {
        let mut pending = String::new();
        for item in items {
            if let Some(adjustment) = number(item) {
                if -adjustment > TJ_CELL_GAP && !pending.is_empty() {
                    self.show(&std::mem::take(&mut pending));
                }
                if pending.is_empty() {
                    self.advance(-adjustment / 1000.0 * self.font_size);
                }
            } else if let Some(text) = decode(item) {
                pending.push_str(&text);
            }
        }
        if !pending.is_empty() {
            self.show(&pending);
        }
    }
}

/// Collects the positioned strings shown by `operations`.
#[must_use]
pub fn text_runs(operations: &[Operation]) -> Vec<TextRun> {
    let mut interpreter = Interpreter::new();
    for op in operations {
        interpreter.apply(op);
    }
    interpreter.runs
}

/// One baseline: cells as `(x, text)`, left to right.
type Line = Vec<(f64, String)>;

/// Groups runs into lines, top to bottom, joining runs closer than a word gap.
fn lines(mut runs: Vec<TextRun>) -> Vec<Line> {
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut grouped: Vec<Vec<TextRun>> = Vec::new();
    for run in runs {
        match grouped.last_mut() {
            Some(line) if (line[0].y - run.y).abs() <= BASELINE_TOLERANCE => line.push(run),
            _ => grouped.push(vec![run]),
        }
    }

    grouped
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            let mut cells: Vec<(f64, String, f64, f64)> = Vec::new();
            for run in line {
                let end = run.estimated_end();
                match cells.last_mut() {
                    Some((_, text, last_end, size))
                        if run.x - *last_end < *size * WORD_GAP_EMS =>
                    {
                        text.push(' ');
                        text.push_str(run.text.trim());
                        *last_end = end;
                    }
                    _ => cells.push((run.x, run.text.trim().to_string(), end, run.size)),
                }
            }
            cells.into_iter().map(|(x, text, _, _)| (x, text)).collect()
        })
        .collect()
}

/// Lays a block of lines onto the columns of its widest line.
///
/// Each cell goes to the anchor nearest its start; columns with no cell
/// in a row stay `None`.
fn align(block: Vec<Line>) -> RawTable {
    let anchors: Vec<f64> = block
        .iter()
        .max_by_key(|line| line.len())
        .map(|line| line.iter().map(|(x, _)| *x).collect())
        .unwrap_or_default();

    let rows = block
        .into_iter()
        .map(|line| {
            let mut row: Vec<Option<String>> = vec![None; anchors.len()];
            for (x, text) in line {
                let Some(column) = anchors
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
                    .map(|(index, _)| index)
                else {
                    continue;
                };
                row[column] = Some(match row[column].take() {
                    Some(existing) => format!("{existing} {text}"),
                    None => text,
                });
            }
            row
        })
        .collect();

    RawTable { rows }
}

/// Detects tables among positioned runs.
///
/// A table is a run of consecutive lines holding two or more cells each.
#[must_use]
pub fn layout_tables(runs: Vec<TextRun>) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut block: Vec<Line> = Vec::new();

    for line in lines(runs) {
        if line.len() >= 2 {
            block.push(line);
        } else if !block.is_empty() {
            tables.push(align(std::mem::take(&mut block)));
        }
    }
    if !block.is_empty() {
        tables.push(align(block));
    }

    tables
}
