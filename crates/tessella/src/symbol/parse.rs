//! Configuration string reader.
//!
//! Grammar: a first group of face degrees (with `L`/`l`/`H` decorations and
//! per-slot `^n` repetition), then declarations: `^n` repeats the whole
//! sequence, `(a b)` pairs two slots, `[a b]` pairs them mirrored, `(a)` and
//! `[a]` set the mirror bit of a single slot. Unknown characters are
//! separators. Reading never fails; range problems are reported to the
//! builder through `out_of_range`.

use crate::cfg::MAX_FACES;

use super::types::SlotFlags;

/// Parsed but unvalidated symbol.
#[derive(Clone, Debug, Default)]
pub(crate) struct RawSymbol {
    pub faces: Vec<usize>,
    /// One entry per face plus a trailing entry for the vertex figure.
    pub flags: Vec<SlotFlags>,
    pub invert: Vec<bool>,
    pub link: Vec<usize>,
    pub have_line: bool,
    pub have_ph: bool,
    /// Anything beyond a bare list of degrees was present.
    pub decorated: bool,
    /// First declared slot index that did not exist.
    pub out_of_range: Option<usize>,
    pub canonical: String,
}

impl RawSymbol {
    fn note_out_of_range(&mut self, index: usize) {
        self.out_of_range.get_or_insert(index);
    }
}

struct Cursor<'a> {
    s: &'a [u8],
    at: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> u8 {
        self.s.get(self.at).copied().unwrap_or(0)
    }

    fn is_number(&self) -> bool {
        self.peek().is_ascii_digit()
    }

    fn read_number(&mut self) -> usize {
        let mut r: usize = 0;
        while self.is_number() {
            r = r
                .saturating_mul(10)
                .saturating_add((self.peek() - b'0') as usize);
            self.at += 1;
        }
        r
    }
}

/// Repetition counts beyond this already exceed the face limit.
const REP_CAP: usize = MAX_FACES + 1;

pub(crate) fn read_symbol(text: &str) -> RawSymbol {
    let mut c = Cursor {
        s: text.as_bytes(),
        at: 0,
    };
    let mut out = RawSymbol::default();
    let mut faces: Vec<usize> = Vec::new();
    let mut flags: Vec<SlotFlags> = Vec::new();

    loop {
        let p = c.peek();
        if p == b')' || (p == b'(' && !faces.is_empty()) || p == 0 {
            break;
        }
        let slot_open = !faces.is_empty();
        match p {
            b'L' | b'l' | b'H' | b'h' if slot_open => {
                if let Some(f) = flags.last_mut() {
                    match p {
                        b'L' => f.line = true,
                        b'l' => f.semiline = true,
                        _ => f.pseudo_vertex = true,
                    }
                }
                if p == b'H' || p == b'h' {
                    out.have_ph = true;
                } else {
                    out.have_line = true;
                }
                out.decorated = true;
                c.at += 1;
            }
            b'^' if slot_open => {
                c.at += 1;
                out.decorated = true;
                let rep = c.read_number().min(REP_CAP);
                if rep == 0 {
                    faces.pop();
                    flags.pop();
                }
                if let (Some(&d), Some(&f)) = (faces.last(), flags.last()) {
                    for _ in 1..rep {
                        faces.push(d);
                        flags.push(f);
                    }
                }
            }
            _ if c.is_number() => {
                faces.push(c.read_number());
                flags.push(SlotFlags::default());
            }
            _ => c.at += 1,
        }
    }

    let n = faces.len();
    let mut invert = vec![true; n];
    let mut link: Vec<usize> = (0..n).collect();
    let mut repetition = 1usize;
    while c.peek() != 0 {
        match c.peek() {
            b'^' => {
                c.at += 1;
                repetition = c.read_number().min(REP_CAP);
                out.decorated = true;
            }
            open @ (b'(' | b'[') => {
                let mirror = open == b'[';
                out.decorated = true;
                c.at += 1;
                let a = c.read_number();
                while !c.is_number() && !matches!(c.peek(), b'(' | b'[' | b')' | b']' | 0) {
                    c.at += 1;
                }
                if c.is_number() {
                    let b = c.read_number();
                    if a >= n {
                        out.note_out_of_range(a);
                    } else if b >= n {
                        out.note_out_of_range(b);
                    } else {
                        link[a] = b;
                        link[b] = a;
                        invert[a] = mirror;
                        invert[b] = mirror;
                    }
                } else if a >= n {
                    out.note_out_of_range(a);
                } else {
                    invert[a] = mirror;
                }
            }
            _ => c.at += 1,
        }
    }

    if repetition == 0 {
        faces.clear();
        flags.clear();
        invert.clear();
        link.clear();
    }
    for i in 0..n * repetition.saturating_sub(1) {
        faces.push(faces[i]);
        flags.push(flags[i]);
        invert.push(invert[i]);
        link.push(link[i] + n);
    }
    flags.push(SlotFlags::default());

    out.canonical = text.trim().to_string();
    out.faces = faces;
    out.flags = flags;
    out.invert = invert;
    out.link = link;
    expand_schlafli(&mut out);
    out
}

/// `{p,q}` shorthand: two distinct degrees of at least 3 and nothing else
/// means `q` copies of `p`.
fn expand_schlafli(raw: &mut RawSymbol) {
    if raw.decorated || raw.faces.len() != 2 {
        return;
    }
    let (p, q) = (raw.faces[0], raw.faces[1]);
    if p == q || p < 3 || q < 3 || q > REP_CAP {
        return;
    }
    raw.faces = vec![p; q];
    raw.flags = vec![SlotFlags::default(); q + 1];
    raw.invert = vec![true; q];
    raw.link = (0..q).collect();
    let body: Vec<String> = raw.faces.iter().map(|d| d.to_string()).collect();
    raw.canonical = format!("({})", body.join(","));
}
