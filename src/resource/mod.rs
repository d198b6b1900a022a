//! Resource store: data-file parsing and rule indexing.
//!
//! Most linguistic knowledge lives in data files, one rule per line:
//!
//! ```text
//! ::abbrev Capt. ::sem-class military-rank
//! ::contraction can't ::target can n't ::lcode eng
//! ::punct-split ! ::side end ::group True
//! ```
//!
//! A line begins with `::<kind>` followed by the rule's key surface and
//! `::slot value` pairs. Values run to the next `::slot` or end of line;
//! a literal `::` inside a value is written `\:\:`. Blank lines and `#`
//! comments are ignored.
//!
//! The store is built once at startup and never mutated, which is what
//! makes it safely shareable across worker threads.

pub mod rules;

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::TokenType;
use crate::error::{ResourceError, Warning};
use rules::{
    parse_token_type, AbbrevRule, AttachRule, Context, ContractionRule, DetokRule, KeyedRule,
    LexicalRule, MisspellingRule, PreserveRule, PunctSplitRule, RepairRule, RuleCommon, Side,
};

pub const TOK_RESOURCE: &str = "tok-resource.txt";
pub const TOK_RESOURCE_ENG_GLOBAL: &str = "tok-resource-eng-global.txt";
pub const DETOK_RESOURCE: &str = "detok-resource.txt";
pub const TLD_FILE: &str = "top-level-domain-codes.txt";

/// The bundled data directory of this crate.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Case folding used for rule keys and lookups. Apostrophe lookalikes
/// (U+2019 etc.) are unified so `Xi’an` finds the `Xi'an` entry.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            c => c,
        })
        .collect()
}

/// All rule tables, indexed for the lookups the pipeline performs.
#[derive(Debug, Default)]
pub struct ResourceStore {
    /// Whole-word contractions, keyed by folded surface.
    contractions: HashMap<String, Vec<ContractionRule>>,
    /// Detachable suffix contractions (`'s`, `n't`), longest first.
    contraction_suffixes: Vec<ContractionRule>,
    /// Detachable prefix contractions (`l'`), longest first.
    contraction_prefixes: Vec<ContractionRule>,
    /// Repairs keyed by folded surface; keys may contain spaces.
    repairs: HashMap<String, RepairRule>,
    /// Longest repair key, in words.
    repair_max_words: usize,
    abbrevs: HashMap<String, Vec<AbbrevRule>>,
    /// Distinct abbreviation key lengths, descending.
    abbrev_lens: Vec<usize>,
    lexicals: HashMap<String, Vec<LexicalRule>>,
    lexical_lens: Vec<usize>,
    misspellings: HashMap<String, Vec<MisspellingRule>>,
    punct_split: HashMap<char, Vec<PunctSplitRule>>,
    markup_attach: HashMap<String, Vec<AttachRule>>,
    auto_attach: Vec<AttachRule>,
    preserves: Vec<PreserveRule>,
    detok: HashMap<String, Vec<DetokRule>>,
    /// Decontraction reversal: folded target sequence -> original surface.
    rejoin: HashMap<String, String>,
    rejoin_max_words: usize,
    tlds: HashSet<String>,
}

impl ResourceStore {
    /// Load all resource files for `lcode` from `data_dir`.
    ///
    /// Rules with an empty `lcode` slot always load; rules from the
    /// eng-global file load as a shared fallback for every language; rules
    /// with a concrete `lcode` load only when it matches. A missing
    /// language-specific file is a warning, not an error.
    pub fn load(data_dir: &Path, lcode: &str) -> Result<(Self, Vec<Warning>), ResourceError> {
        let mut store = ResourceStore::default();
        let mut warnings = Vec::new();

        store.load_rule_file(&data_dir.join(TOK_RESOURCE), lcode, false, &mut warnings)?;

        let eng_global = data_dir.join(TOK_RESOURCE_ENG_GLOBAL);
        if eng_global.exists() {
            store.load_rule_file(&eng_global, lcode, true, &mut warnings)?;
        } else {
            warnings.push(Warning::new(format!(
                "missing shared resource file {}",
                eng_global.display()
            )));
        }

        if !lcode.is_empty() {
            let specific = data_dir.join(format!("tok-resource-{}.txt", lcode));
            if specific.exists() {
                store.load_rule_file(&specific, lcode, false, &mut warnings)?;
            } else {
                warnings.push(Warning::new(format!(
                    "no resources for language `{}`; falling back to universal rules",
                    lcode
                )));
            }
        }

        let detok = data_dir.join(DETOK_RESOURCE);
        if detok.exists() {
            store.load_rule_file(&detok, lcode, true, &mut warnings)?;
        }

        store.load_tld_file(&data_dir.join(TLD_FILE))?;
        store.build_indexes();
        Ok((store, warnings))
    }

    fn load_rule_file(
        &mut self,
        path: &Path,
        lcode: &str,
        global_fallback: bool,
        warnings: &mut Vec<Warning>,
    ) -> Result<(), ResourceError> {
        let is_detok = path
            .file_name()
            .map(|n| n == DETOK_RESOURCE)
            .unwrap_or(false);
        let content = fs::read_to_string(path)
            .map_err(|e| ResourceError::new(path, 0, format!("cannot read file: {}", e)))?;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let raw = parse_rule_line(path, line_no, line)?;

            // Language gate: universal rules and shared-fallback files
            // always load.
            let rule_lcode = raw.slot_peek("lcode").unwrap_or("");
            if !rule_lcode.is_empty() && rule_lcode != lcode && !global_fallback {
                continue;
            }

            if is_detok {
                self.add_detok_rule(raw)?;
            } else {
                self.add_tok_rule(raw, warnings)?;
            }
        }
        Ok(())
    }

    fn load_tld_file(&mut self, path: &Path) -> Result<(), ResourceError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ResourceError::new(path, 0, format!("cannot read file: {}", e)))?;
        for line in content.lines() {
            let tld = line.trim();
            if tld.is_empty() || tld.starts_with('#') {
                continue;
            }
            self.tlds.insert(tld.to_lowercase());
        }
        Ok(())
    }

    fn add_detok_rule(&mut self, mut raw: RawRule) -> Result<(), ResourceError> {
        match raw.kind.as_str() {
            "markup-attach" => {
                let side = raw.side_slot()?.unwrap_or(Side::Start);
                let common = raw.common()?;
                let rule = DetokRule {
                    surface: raw.key.clone(),
                    side,
                    common,
                };
                self.detok.entry(fold(&raw.key)).or_default().push(rule);
                Ok(())
            }
            other => Err(raw.error(format!("unknown detokenizer rule kind `{}`", other))),
        }
    }

    fn add_tok_rule(
        &mut self,
        mut raw: RawRule,
        warnings: &mut Vec<Warning>,
    ) -> Result<(), ResourceError> {
        match raw.kind.as_str() {
            "contraction" => {
                let target = raw.required_slot("target")?;
                let side = raw.side_slot()?;
                let variations = raw.take_slot("suffix-variations");
                let common = raw.common()?;
                let mut entries = vec![(raw.key.clone(), target.clone())];
                if let Some(vars) = variations {
                    for v in vars.split(';').map(str::trim).filter(|v| !v.is_empty()) {
                        entries.push((format!("{}{}", raw.key, v), format!("{} {}", target, v)));
                    }
                }
                for (surface, target) in entries {
                    let rule = ContractionRule {
                        surface: surface.clone(),
                        target,
                        side,
                        common: common.clone(),
                    };
                    match side {
                        Some(Side::End) => self.contraction_suffixes.push(rule),
                        Some(Side::Start) => self.contraction_prefixes.push(rule),
                        _ => {
                            let bucket = self.contractions.entry(fold(&surface)).or_default();
                            warn_duplicate(bucket, &surface, &rule.common, &raw, warnings);
                            bucket.push(rule);
                        }
                    }
                }
                Ok(())
            }
            "repair" => {
                let target = raw.required_slot("target")?;
                let token_type = raw.type_slot()?;
                let common = raw.common()?;
                let key = fold(&raw.key);
                if self.repairs.contains_key(&key) {
                    warnings.push(Warning::in_file(
                        &raw.file,
                        raw.line_no,
                        format!("duplicate repair rule for `{}`; last wins", raw.key),
                    ));
                }
                self.repairs.insert(
                    key,
                    RepairRule {
                        surface: raw.key.clone(),
                        target,
                        token_type,
                        common,
                    },
                );
                Ok(())
            }
            "abbrev" => {
                let exp = raw.take_slot("exp");
                let plural = raw.take_slot("plural");
                let variations = raw.take_slot("suffix-variations");
                let mut common = raw.common()?;
                // Abbreviations default to case-sensitive.
                if !raw.had_case_slot {
                    common.case_sensitive = true;
                }
                for surface in expand_variants(&raw.key, variations.as_deref(), plural.as_deref()) {
                    let rule = AbbrevRule {
                        surface: surface.clone(),
                        exp: exp.clone(),
                        common: common.clone(),
                    };
                    let bucket = self.abbrevs.entry(fold(&surface)).or_default();
                    warn_duplicate(bucket, &surface, &rule.common, &raw, warnings);
                    bucket.push(rule);
                }
                Ok(())
            }
            "lexical" | "resource-rule" => {
                let default_type = if raw.kind == "lexical" {
                    TokenType::Lexical
                } else {
                    TokenType::Misc
                };
                let token_type = raw.type_slot()?.unwrap_or(default_type);
                let plural = raw.take_slot("plural");
                let variations = raw.take_slot("suffix-variations");
                let common = raw.common()?;
                for surface in expand_variants(&raw.key, variations.as_deref(), plural.as_deref()) {
                    let rule = LexicalRule {
                        surface: surface.clone(),
                        token_type,
                        common: common.clone(),
                    };
                    let bucket = self.lexicals.entry(fold(&surface)).or_default();
                    warn_duplicate(bucket, &surface, &rule.common, &raw, warnings);
                    bucket.push(rule);
                }
                Ok(())
            }
            "misspelling" => {
                let target = raw.required_slot("target")?;
                let variations = raw.take_slot("suffix-variations");
                let common = raw.common()?;
                let mut entries = vec![(raw.key.clone(), target.clone())];
                if let Some(vars) = variations {
                    // Generated variants inherit the base entry's
                    // case-sensitivity.
                    for v in vars.split(';').map(str::trim).filter(|v| !v.is_empty()) {
                        entries.push((format!("{}{}", raw.key, v), format!("{}{}", target, v)));
                    }
                }
                for (surface, target) in entries {
                    let rule = MisspellingRule {
                        surface: surface.clone(),
                        target,
                        common: common.clone(),
                    };
                    let bucket = self.misspellings.entry(fold(&surface)).or_default();
                    warn_duplicate(bucket, &surface, &rule.common, &raw, warnings);
                    bucket.push(rule);
                }
                Ok(())
            }
            "punct-split" => {
                let side = raw.side_slot()?.unwrap_or(Side::Both);
                let group = raw.bool_slot("group")?.unwrap_or(false);
                let common = raw.common()?;
                let mut chars = raw.key.chars();
                let c = chars
                    .next()
                    .ok_or_else(|| raw.error("punct-split rule has empty key".to_string()))?;
                if chars.next().is_some() {
                    return Err(raw.error(format!(
                        "punct-split key `{}` must be a single character",
                        raw.key
                    )));
                }
                self.punct_split.entry(c).or_default().push(PunctSplitRule {
                    surface: c,
                    side,
                    group,
                    common,
                });
                Ok(())
            }
            "markup-attach" => {
                let side = raw.side_slot()?.unwrap_or(Side::Both);
                let common = raw.common()?;
                let rule = AttachRule {
                    surface: raw.key.clone(),
                    side,
                    common,
                };
                self.markup_attach
                    .entry(fold(&raw.key))
                    .or_default()
                    .push(rule);
                Ok(())
            }
            "auto-attach" => {
                let side = raw.side_slot()?.unwrap_or(Side::Start);
                let common = raw.common()?;
                self.auto_attach.push(AttachRule {
                    surface: raw.key.clone(),
                    side,
                    common,
                });
                Ok(())
            }
            "preserve" => {
                let token_type = raw.type_slot()?.unwrap_or(TokenType::Filename);
                let pattern = Regex::new(&raw.key)
                    .map_err(|e| raw.error(format!("unparseable preserve pattern: {}", e)))?;
                let common = raw.common()?;
                self.preserves.push(PreserveRule {
                    pattern,
                    token_type,
                    common,
                });
                Ok(())
            }
            other => Err(raw.error(format!("unknown rule kind `{}`", other))),
        }
    }

    /// Post-load indexing: sort affix rules longest-first, collect key
    /// lengths, and derive the decontraction reversal map.
    fn build_indexes(&mut self) {
        self.contraction_suffixes
            .sort_by_key(|r| std::cmp::Reverse(r.surface.chars().count()));
        self.contraction_prefixes
            .sort_by_key(|r| std::cmp::Reverse(r.surface.chars().count()));

        self.abbrev_lens = key_lengths(&self.abbrevs);
        self.lexical_lens = key_lengths(&self.lexicals);

        self.repair_max_words = self
            .repairs
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(0);

        for rules in self.contractions.values() {
            for rule in rules {
                // Only target sequences that could not occur as ordinary
                // running text are reversible; `you all` must never
                // collapse back into `y'all`.
                if rule.target.contains('\'') {
                    self.rejoin.insert(fold(&rule.target), rule.surface.clone());
                }
            }
        }
        for rule in self.repairs.values() {
            if rule.surface.contains(' ') {
                // `wo n't -> will n't`: reversing the repaired split must
                // restore the contracted original, which the rejoin map
                // knows under the unrepaired key.
                let unrepaired = fold(&rule.surface);
                if let Some(orig) = self.rejoin.get(&unrepaired).cloned() {
                    self.rejoin.insert(fold(&rule.target), orig);
                }
            }
        }
        self.rejoin_max_words = self
            .rejoin
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(0);
    }

    // Lookup API used by the pipeline.

    pub fn contraction_word(&self, word: &str) -> Option<&ContractionRule> {
        best_rule(self.contractions.get(&fold(word)), word)
    }

    pub fn contraction_suffixes(&self) -> &[ContractionRule] {
        &self.contraction_suffixes
    }

    pub fn contraction_prefixes(&self) -> &[ContractionRule] {
        &self.contraction_prefixes
    }

    pub fn repair(&self, fragment: &str) -> Option<&RepairRule> {
        let rule = self.repairs.get(&fold(fragment))?;
        if rule.common.case_sensitive && rule.surface != fragment {
            return None;
        }
        Some(rule)
    }

    pub fn repair_max_words(&self) -> usize {
        self.repair_max_words
    }

    pub fn abbrev(&self, word: &str) -> Option<&AbbrevRule> {
        best_rule(self.abbrevs.get(&fold(word)), word)
    }

    pub fn abbrev_lens(&self) -> &[usize] {
        &self.abbrev_lens
    }

    pub fn lexical(&self, expr: &str) -> Option<&LexicalRule> {
        best_rule(self.lexicals.get(&fold(expr)), expr)
    }

    pub fn lexical_lens(&self) -> &[usize] {
        &self.lexical_lens
    }

    pub fn misspelling(&self, word: &str) -> Option<&MisspellingRule> {
        best_rule(self.misspellings.get(&fold(word)), word)
    }

    pub fn punct_rules(&self, c: char) -> &[PunctSplitRule] {
        self.punct_split.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_punct_rules(&self, c: char) -> bool {
        self.punct_split.contains_key(&c)
    }

    pub fn markup_rules(&self, surface: &str) -> &[AttachRule] {
        self.markup_attach
            .get(&fold(surface))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn auto_attach_rules(&self) -> &[AttachRule] {
        &self.auto_attach
    }

    pub fn preserves(&self) -> &[PreserveRule] {
        &self.preserves
    }

    pub fn detok_rules(&self, surface: &str) -> &[DetokRule] {
        self.detok
            .get(&fold(surface))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rejoin(&self, sequence: &str) -> Option<&str> {
        self.rejoin.get(&fold(sequence)).map(String::as_str)
    }

    pub fn rejoin_max_words(&self) -> usize {
        self.rejoin_max_words
    }

    pub fn is_tld(&self, tld: &str) -> bool {
        self.tlds.contains(&tld.to_lowercase())
    }
}

fn key_lengths<V>(map: &HashMap<String, V>) -> Vec<usize> {
    let mut lens: Vec<usize> = map
        .keys()
        .map(|k| k.chars().count())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    lens.sort_unstable_by(|a, b| b.cmp(a));
    lens
}

fn warn_duplicate<R: KeyedRule>(
    bucket: &[R],
    surface: &str,
    common: &RuleCommon,
    raw: &RawRule,
    warnings: &mut Vec<Warning>,
) {
    if bucket
        .iter()
        .any(|r| r.surface() == surface && r.common().lcode == common.lcode)
    {
        warnings.push(Warning::in_file(
            &raw.file,
            raw.line_no,
            format!("duplicate {} rule for `{}`; last wins", raw.kind, surface),
        ));
    }
}

/// Pick the best rule for a looked-up key: case-sensitivity respected, a
/// concrete lcode beats universal, later rules beat earlier on a tie.
fn best_rule<'a, R: KeyedRule>(rules: Option<&'a Vec<R>>, key: &str) -> Option<&'a R> {
    let mut best: Option<(&'a R, usize)> = None;
    for rule in rules? {
        if rule.common().case_sensitive && rule.surface() != key {
            continue;
        }
        let rank = rule.common().specificity();
        if best.map(|(_, s)| rank >= s).unwrap_or(true) {
            best = Some((rule, rank));
        }
    }
    best.map(|(r, _)| r)
}

/// Expand `suffix-variations` and `plural` slots into extra surfaces.
fn expand_variants(key: &str, variations: Option<&str>, plural: Option<&str>) -> Vec<String> {
    let mut out = vec![key.to_string()];
    if let Some(vars) = variations {
        for v in vars.split(';').map(str::trim).filter(|v| !v.is_empty()) {
            out.push(format!("{}{}", key, v));
        }
    }
    if let Some(plural) = plural {
        for p in plural.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            out.push(p.to_string());
        }
    }
    out
}

/// A parsed but not yet typed rule line.
#[derive(Debug)]
struct RawRule {
    file: PathBuf,
    line_no: usize,
    kind: String,
    key: String,
    slots: Vec<(String, String)>,
    had_case_slot: bool,
}

impl RawRule {
    fn error(&self, message: String) -> ResourceError {
        ResourceError::new(&self.file, self.line_no, message)
            .with_rule(format!("::{} {}", self.kind, self.key))
    }

    fn slot_peek(&self, name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn take_slot(&mut self, name: &str) -> Option<String> {
        let pos = self.slots.iter().position(|(n, _)| n == name)?;
        Some(self.slots.remove(pos).1)
    }

    fn required_slot(&mut self, name: &str) -> Result<String, ResourceError> {
        self.take_slot(name)
            .ok_or_else(|| self.error(format!("missing required slot `{}`", name)))
    }

    fn bool_slot(&mut self, name: &str) -> Result<Option<bool>, ResourceError> {
        match self.take_slot(name) {
            None => Ok(None),
            Some(v) => match v.as_str() {
                "True" | "true" | "1" | "yes" => Ok(Some(true)),
                "False" | "false" | "0" | "no" => Ok(Some(false)),
                other => Err(self.error(format!("malformed boolean slot `{}`: {}", name, other))),
            },
        }
    }

    fn side_slot(&mut self) -> Result<Option<Side>, ResourceError> {
        match self.take_slot("side") {
            None => Ok(None),
            Some(v) => v
                .parse::<Side>()
                .map(Some)
                .map_err(|e| self.error(format!("malformed slot `side`: {}", e))),
        }
    }

    fn type_slot(&mut self) -> Result<Option<TokenType>, ResourceError> {
        match self.take_slot("type") {
            None => Ok(None),
            Some(v) => parse_token_type(&v)
                .map(Some)
                .ok_or_else(|| self.error(format!("unknown token type `{}`", v))),
        }
    }

    fn context(&mut self) -> Result<Context, ResourceError> {
        let left = match self.take_slot("left-context") {
            None => None,
            Some(p) => Some(
                Regex::new(&format!("(?:{})$", p))
                    .map_err(|e| self.error(format!("unparseable left-context regex: {}", e)))?,
            ),
        };
        let right = match self.take_slot("right-context") {
            None => None,
            Some(p) => Some(
                Regex::new(&format!("^(?:{})", p))
                    .map_err(|e| self.error(format!("unparseable right-context regex: {}", e)))?,
            ),
        };
        Ok(Context { left, right })
    }

    /// Drain the common slots; whatever remains goes into the `extra` map.
    fn common(&mut self) -> Result<RuleCommon, ResourceError> {
        let lcode = self.take_slot("lcode").unwrap_or_default();
        self.had_case_slot = self.slot_peek("case-sensitive").is_some();
        let case_sensitive = self.bool_slot("case-sensitive")?.unwrap_or(false);
        let sem_class = self.take_slot("sem-class");
        let context = self.context()?;
        let extra: HashMap<String, String> = self.slots.drain(..).collect();
        Ok(RuleCommon {
            lcode,
            case_sensitive,
            sem_class,
            context,
            extra,
        })
    }
}

/// Split a rule line into `(kind, key, slots)`.
///
/// A slot starts at a `::` that sits at the start of the line or after
/// whitespace; `\:\:` escapes a literal `::` inside values.
fn parse_rule_line(file: &Path, line_no: usize, line: &str) -> Result<RawRule, ResourceError> {
    if !line.starts_with("::") {
        return Err(ResourceError::new(
            file,
            line_no,
            format!("rule line must start with `::`: {}", line),
        ));
    }

    let bytes = line.as_bytes();
    let mut field_starts = vec![0usize];
    let mut i = 1;
    while i + 1 < bytes.len() {
        if bytes[i] == b':' && bytes[i + 1] == b':' && bytes[i - 1].is_ascii_whitespace() {
            field_starts.push(i);
            i += 2;
        } else {
            i += 1;
        }
    }
    field_starts.push(bytes.len());

    let mut fields = Vec::new();
    for w in field_starts.windows(2) {
        let field = line[w[0]..w[1]].trim();
        let body = &field[2..];
        let (name, value) = match body.find(char::is_whitespace) {
            Some(pos) => (&body[..pos], body[pos..].trim()),
            None => (body, ""),
        };
        if name.is_empty() {
            return Err(ResourceError::new(
                file,
                line_no,
                format!("malformed slot in rule line: {}", line),
            ));
        }
        fields.push((name.to_string(), unescape(value)));
    }

    let (kind, key) = fields.remove(0);
    if key.is_empty() {
        return Err(ResourceError::new(
            file,
            line_no,
            format!("rule `::{}` has no key surface", kind),
        ));
    }

    Ok(RawRule {
        file: file.to_path_buf(),
        line_no,
        kind,
        key,
        slots: fields,
        had_case_slot: false,
    })
}

fn unescape(value: &str) -> String {
    value.replace("\\:\\:", "::")
}

/// Escape a literal `::` for annotation output and rule files.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("::") {
        let _ = write!(out, "{}\\:\\:", &rest[..pos]);
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: &str) -> RawRule {
        parse_rule_line(Path::new("test.txt"), 1, line).unwrap()
    }

    #[test]
    fn test_parse_simple_rule() {
        let r = raw("::abbrev Capt. ::sem-class military-rank");
        assert_eq!(r.kind, "abbrev");
        assert_eq!(r.key, "Capt.");
        assert_eq!(r.slot_peek("sem-class"), Some("military-rank"));
    }

    #[test]
    fn test_value_with_spaces() {
        let r = raw("::contraction can't ::target can n't ::lcode eng");
        assert_eq!(r.slot_peek("target"), Some("can n't"));
        assert_eq!(r.slot_peek("lcode"), Some("eng"));
    }

    #[test]
    fn test_escaped_double_colon() {
        let r = raw(r"::lexical foo ::sem-class a\:\:b");
        assert_eq!(r.slot_peek("sem-class"), Some("a::b"));
        assert_eq!(escape("a::b"), r"a\:\:b");
    }

    #[test]
    fn test_key_containing_colon() {
        let r = raw("::punct-split : ::side end");
        assert_eq!(r.key, ":");
        assert_eq!(r.slot_peek("side"), Some("end"));
    }

    #[test]
    fn test_rejects_missing_key() {
        let err = parse_rule_line(Path::new("t.txt"), 3, "::abbrev").unwrap_err();
        assert!(err.to_string().contains("no key surface"));
        assert!(err.to_string().contains("t.txt:3"));
    }

    #[test]
    fn test_expand_variants() {
        let v = expand_variants("T-shirt", Some("s"), None);
        assert_eq!(v, vec!["T-shirt", "T-shirts"]);
        let v = expand_variants("No.", None, Some("Nos."));
        assert_eq!(v, vec!["No.", "Nos."]);
    }
}
