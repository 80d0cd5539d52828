//! Classification of SQL statement text by its leading keyword.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    /// `INSERT` and `REPLACE`.
    Insert,
    Update,
    Delete,
    /// `CREATE`, `DROP` and `ALTER`.
    Ddl,
    Other,
}

impl StatementKind {
    /// Classifies the first statement in `sql`.
    ///
    /// Leading comments are skipped. For a statement starting with a `WITH` clause the
    /// kind of the main statement following the common table expressions is returned.
    pub fn classify(sql: &str) -> Self {
        let mut tokens = TopLevelTokens::new(sql);
        let Some(Token::Word(first)) = tokens.next() else {
            return StatementKind::Other;
        };
        if !first.eq_ignore_ascii_case("WITH") {
            return Self::from_keyword(first);
        }

        // The main statement starts at the first word after a closing parenthesis that
        // is not followed by a comma. A column list `cte(a, b)` is followed by `AS`.
        let mut after_body = false;
        for token in tokens {
            match token {
                Token::Close => after_body = true,
                Token::Comma => after_body = false,
                Token::Word(word) if after_body => {
                    if word.eq_ignore_ascii_case("AS") {
                        after_body = false;
                    } else {
                        return Self::from_keyword(word);
                    }
                }
                Token::Word(_) => {}
            }
        }
        StatementKind::Other
    }

    /// True for statements that can change rows.
    pub fn is_dml(self) -> bool {
        matches!(self, StatementKind::Insert | StatementKind::Update | StatementKind::Delete)
    }

    fn from_keyword(word: &str) -> Self {
        match word.to_ascii_uppercase().as_str() {
            "SELECT" | "VALUES" => StatementKind::Select,
            "INSERT" | "REPLACE" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            "CREATE" | "DROP" | "ALTER" => StatementKind::Ddl,
            _ => StatementKind::Other,
        }
    }
}

enum Token<'a> {
    Word(&'a str),
    /// A `)` that returns to the top level.
    Close,
    /// A top level `,`.
    Comma,
}

/// Tokens outside of parentheses, with comments, string literals and quoted
/// identifiers skipped.
struct TopLevelTokens<'a> {
    sql: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> TopLevelTokens<'a> {
    fn new(sql: &'a str) -> Self {
        Self { sql, pos: 0, depth: 0 }
    }

    fn skip_past(&mut self, terminator: &str) {
        self.pos = match self.sql[self.pos..].find(terminator) {
            Some(offset) => self.pos + offset + terminator.len(),
            None => self.sql.len(),
        };
    }
}

impl<'a> Iterator for TopLevelTokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while let Some(c) = self.sql[self.pos..].chars().next() {
            let rest = &self.sql[self.pos..];
            if rest.starts_with("--") {
                self.skip_past("\n");
                continue;
            }
            if rest.starts_with("/*") {
                self.pos += 2;
                self.skip_past("*/");
                continue;
            }
            self.pos += c.len_utf8();
            match c {
                '\'' => self.skip_past("'"),
                '"' => self.skip_past("\""),
                '`' => self.skip_past("`"),
                '[' => self.skip_past("]"),
                '(' => self.depth += 1,
                ')' if self.depth == 1 => {
                    self.depth = 0;
                    return Some(Token::Close);
                }
                ')' => self.depth = self.depth.saturating_sub(1),
                ',' if self.depth == 0 => return Some(Token::Comma),
                c if c.is_alphanumeric() || c == '_' => {
                    let start = self.pos - c.len_utf8();
                    let len = self.sql[self.pos..]
                        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                        .unwrap_or(self.sql.len() - self.pos);
                    self.pos += len;
                    if self.depth == 0 {
                        let sql = self.sql;
                        return Some(Token::Word(&sql[start..self.pos]));
                    }
                }
                _ => {}
            }
        }
        None
    }
}
