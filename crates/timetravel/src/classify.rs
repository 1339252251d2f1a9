//! Statement-head classification.
//!
//! The capture protocol needs to know, before a statement runs, whether it is
//! DML and which table it targets. This reads the statement head (keyword and
//! target identifier, comment and quote aware) instead of walking a bound
//! plan, so it must never be confused by string literals or CTE bodies.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatementHead {
    /// INSERT, UPDATE or DELETE against a named table (schema qualifier
    /// dropped, quoted names decoded).
    Dml { target: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Word(String),
    Quoted(String),
    Dot,
    Other,
}

struct Tokens<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: i32,
}

impl<'a> Tokens<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            src: sql,
            bytes: sql.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn skip_noise(&mut self) {
        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.bytes[self.pos..].starts_with(b"--") {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if self.bytes[self.pos..].starts_with(b"/*") {
                self.pos += 2;
                while self.pos < self.bytes.len() && !self.bytes[self.pos..].starts_with(b"*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.bytes.len());
            } else {
                return;
            }
        }
    }

    /// Next token and the paren depth it sits at.
    fn next_tok(&mut self) -> Option<(Tok, i32)> {
        self.skip_noise();
        let b = *self.bytes.get(self.pos)?;
        let depth = self.depth;
        match b {
            b'(' => {
                self.pos += 1;
                self.depth += 1;
                Some((Tok::Other, depth))
            }
            b')' => {
                self.pos += 1;
                self.depth -= 1;
                Some((Tok::Other, depth))
            }
            b'"' => {
                self.pos += 1;
                let mut name = String::new();
                while self.pos < self.bytes.len() {
                    if self.bytes[self.pos] == b'"' {
                        if self.bytes.get(self.pos + 1) == Some(&b'"') {
                            name.push('"');
                            self.pos += 2;
                        } else {
                            self.pos += 1;
                            break;
                        }
                    } else {
                        let start = self.pos;
                        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'"' {
                            self.pos += 1;
                        }
                        name.push_str(&self.src[start..self.pos]);
                    }
                }
                Some((Tok::Quoted(name), depth))
            }
            b'\'' => {
                self.pos += 1;
                while self.pos < self.bytes.len() {
                    if self.bytes[self.pos] == b'\'' {
                        if self.bytes.get(self.pos + 1) == Some(&b'\'') {
                            self.pos += 2;
                        } else {
                            self.pos += 1;
                            break;
                        }
                    } else {
                        self.pos += 1;
                    }
                }
                Some((Tok::Other, depth))
            }
            b'.' => {
                self.pos += 1;
                Some((Tok::Dot, depth))
            }
            _ if b.is_ascii_alphabetic() || b == b'_' || b >= 0x80 => {
                let start = self.pos;
                while self.pos < self.bytes.len() {
                    let c = self.bytes[self.pos];
                    if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80 {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Some((Tok::Word(self.src[start..self.pos].to_string()), depth))
            }
            _ => {
                self.pos += 1;
                Some((Tok::Other, depth))
            }
        }
    }
}

pub(crate) fn statement_head(sql: &str) -> StatementHead {
    let mut t = Tokens::new(sql);
    match t.next_tok() {
        Some((Tok::Word(first), _)) => head_for_keyword(&first, &mut t, true),
        _ => StatementHead::Other,
    }
}

fn head_for_keyword(keyword: &str, t: &mut Tokens<'_>, allow_with: bool) -> StatementHead {
    if keyword.eq_ignore_ascii_case("INSERT") {
        // INSERT [OR REPLACE | OR IGNORE] INTO <target>
        for _ in 0..4 {
            match t.next_tok() {
                Some((Tok::Word(w), _)) if w.eq_ignore_ascii_case("INTO") => return target_of(t),
                Some((Tok::Word(_), _)) => continue,
                _ => return StatementHead::Other,
            }
        }
        StatementHead::Other
    } else if keyword.eq_ignore_ascii_case("UPDATE") {
        target_of(t)
    } else if keyword.eq_ignore_ascii_case("DELETE") {
        match t.next_tok() {
            Some((Tok::Word(w), _)) if w.eq_ignore_ascii_case("FROM") => target_of(t),
            _ => StatementHead::Other,
        }
    } else if allow_with && keyword.eq_ignore_ascii_case("WITH") {
        // CTE bodies are parenthesized, so top-level DML sits at depth 0.
        while let Some((tok, depth)) = t.next_tok() {
            if depth == 0 {
                if let Tok::Word(w) = &tok {
                    if w.eq_ignore_ascii_case("INSERT")
                        || w.eq_ignore_ascii_case("UPDATE")
                        || w.eq_ignore_ascii_case("DELETE")
                    {
                        let w = w.clone();
                        return head_for_keyword(&w, t, false);
                    }
                }
            }
        }
        StatementHead::Other
    } else {
        StatementHead::Other
    }
}

fn target_of(t: &mut Tokens<'_>) -> StatementHead {
    let mut name = match t.next_tok() {
        Some((Tok::Word(w), _)) => w,
        Some((Tok::Quoted(q), _)) => q,
        _ => return StatementHead::Other,
    };
    // catalog.schema.table keeps the last component
    loop {
        match t.next_tok() {
            Some((Tok::Dot, _)) => match t.next_tok() {
                Some((Tok::Word(w), _)) => name = w,
                Some((Tok::Quoted(q), _)) => name = q,
                _ => return StatementHead::Other,
            },
            _ => break,
        }
    }
    StatementHead::Dml { target: name }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dml(target: &str) -> StatementHead {
        StatementHead::Dml {
            target: target.to_string(),
        }
    }

    #[test]
    fn classifies_plain_dml() {
        assert_eq!(statement_head("INSERT INTO t VALUES (1)"), dml("t"));
        assert_eq!(statement_head("update accounts set v = 1"), dml("accounts"));
        assert_eq!(statement_head("DELETE FROM t WHERE id = 2"), dml("t"));
        assert_eq!(statement_head("INSERT OR REPLACE INTO t VALUES (1)"), dml("t"));
    }

    #[test]
    fn ignores_non_dml() {
        assert_eq!(statement_head("SELECT * FROM t"), StatementHead::Other);
        assert_eq!(statement_head("CREATE TABLE t (id INT)"), StatementHead::Other);
        assert_eq!(statement_head("  "), StatementHead::Other);
        assert_eq!(statement_head("PRAGMA version"), StatementHead::Other);
    }

    #[test]
    fn reads_through_comments() {
        assert_eq!(
            statement_head("-- audit\n/* multi */ INSERT INTO t VALUES (1)"),
            dml("t")
        );
    }

    #[test]
    fn strips_schema_qualifier() {
        assert_eq!(statement_head("UPDATE main.t SET x = 1"), dml("t"));
        assert_eq!(statement_head("DELETE FROM db.main.t"), dml("t"));
    }

    #[test]
    fn decodes_quoted_targets() {
        assert_eq!(
            statement_head(r#"UPDATE "my ""odd"" table" SET x = 1"#),
            dml(r#"my "odd" table"#)
        );
        assert_eq!(statement_head(r#"INSERT INTO main."t" VALUES (1)"#), dml("t"));
    }

    #[test]
    fn string_literals_do_not_confuse() {
        assert_eq!(
            statement_head("SELECT 'DELETE FROM t' AS note"),
            StatementHead::Other
        );
        assert_eq!(
            statement_head("WITH x AS (SELECT 'INSERT INTO bad') DELETE FROM t"),
            dml("t")
        );
    }

    #[test]
    fn cte_headed_dml_is_found() {
        assert_eq!(
            statement_head("WITH src AS (SELECT 1 AS id) INSERT INTO t SELECT * FROM src"),
            dml("t")
        );
        assert_eq!(
            statement_head("WITH src AS (SELECT 1) SELECT * FROM src"),
            StatementHead::Other
        );
    }
}
