//! Deterministic constituency parser over tagged tokens.
//!
//! Noun phrases are chunked first (determiner, modifiers, nominal head,
//! possessives), then clauses are built by recursive descent: leading
//! subordinate clauses and adverbials, a subject noun phrase with its
//! post-modifiers, and a verb phrase made of a verb group followed by its
//! complements. Trees print in Penn Treebank bracket notation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lexicon::{is_be_form, is_get_form, is_have_form, is_subordinator};
use super::tagger::{is_adjective_tag, is_adverb_tag, is_noun_tag, is_verb_tag, TaggedToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Root,
    S,
    Sbar,
    Np,
    Vp,
    Pp,
    Adjp,
    Advp,
    Whnp,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Root => "ROOT",
            Label::S => "S",
            Label::Sbar => "SBAR",
            Label::Np => "NP",
            Label::Vp => "VP",
            Label::Pp => "PP",
            Label::Adjp => "ADJP",
            Label::Advp => "ADVP",
            Label::Whnp => "WHNP",
        }
    }
}

/// A constituency tree. Leaves carry the tagged token they cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseTree {
    Leaf(TaggedToken),
    Phrase { label: Label, children: Vec<ParseTree> },
}

impl ParseTree {
    pub fn phrase(label: Label, children: Vec<ParseTree>) -> Self {
        ParseTree::Phrase { label, children }
    }

    pub fn label(&self) -> Option<Label> {
        match self {
            ParseTree::Leaf(_) => None,
            ParseTree::Phrase { label, .. } => Some(*label),
        }
    }

    pub fn is(&self, wanted: Label) -> bool {
        self.label() == Some(wanted)
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Leaf(_) => &[],
            ParseTree::Phrase { children, .. } => children,
        }
    }

    pub fn as_leaf(&self) -> Option<&TaggedToken> {
        match self {
            ParseTree::Leaf(token) => Some(token),
            ParseTree::Phrase { .. } => None,
        }
    }

    /// All tokens under this node, left to right.
    pub fn leaves(&self) -> Vec<&TaggedToken> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TaggedToken>) {
        match self {
            ParseTree::Leaf(token) => out.push(token),
            ParseTree::Phrase { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf(token) => write!(f, "({} {})", token.tag, token.word),
            ParseTree::Phrase { label, children } => {
                write!(f, "({}", label.as_str())?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstituencyParser;

impl ConstituencyParser {
    /// Parse one tagged sentence into a tree rooted at `ROOT`.
    pub fn parse(&self, tokens: &[TaggedToken]) -> ParseTree {
        let mut cursor = Cursor { tokens, pos: 0 };
        let mut items = Vec::new();
        while !cursor.at_end() {
            match cursor.clause() {
                Some(clause) => items.push(clause),
                None => items.push(cursor.take_leaf()),
            }
        }
        if items.is_empty() {
            return ParseTree::phrase(Label::Root, Vec::new());
        }

        let clauses = items.iter().filter(|item| item.is(Label::S)).count();
        let sentence = if clauses == 1 {
            // a single clause absorbs the loose punctuation around it
            let mut children = Vec::new();
            for item in items {
                match item {
                    ParseTree::Phrase { label: Label::S, children: inner } => {
                        children.extend(inner)
                    }
                    other => children.push(other),
                }
            }
            ParseTree::phrase(Label::S, children)
        } else {
            ParseTree::phrase(Label::S, items)
        };
        ParseTree::phrase(Label::Root, vec![sentence])
    }
}

struct Cursor<'t> {
    tokens: &'t [TaggedToken],
    pos: usize,
}

fn is_wh_tag(tag: &str) -> bool {
    matches!(tag, "WDT" | "WP")
}

fn is_clause_break(tag: &str) -> bool {
    matches!(tag, "," | "." | ":")
}

impl<'t> Cursor<'t> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn tag_at(&self, index: usize) -> &'t str {
        self.tokens.get(index).map_or("", |t| t.tag.as_str())
    }

    fn tag(&self) -> &'t str {
        self.tag_at(self.pos)
    }

    fn word(&self) -> &'t str {
        self.tokens.get(self.pos).map_or("", |t| t.word.as_str())
    }

    fn take_leaf(&mut self) -> ParseTree {
        let leaf = ParseTree::Leaf(self.tokens[self.pos].clone());
        self.pos += 1;
        leaf
    }

    fn leaves(&self, from: usize, to: usize) -> Vec<ParseTree> {
        self.tokens[from..to].iter().cloned().map(ParseTree::Leaf).collect()
    }

    fn next_non_adverb(&self, from: usize) -> usize {
        let mut index = from;
        while is_adverb_tag(self.tag_at(index)) {
            index += 1;
        }
        index
    }

    fn is_auxiliary(&self, index: usize) -> bool {
        let Some(token) = self.tokens.get(index) else {
            return false;
        };
        let auxiliary_word = token.tag == "MD"
            || (is_verb_tag(&token.tag)
                && (is_be_form(&token.word)
                    || is_have_form(&token.word)
                    || is_get_form(&token.word)
                    || matches!(token.word.to_lowercase().as_str(), "do" | "does" | "did")));
        auxiliary_word && is_verb_tag(self.tag_at(self.next_non_adverb(index + 1)))
    }

    fn starts_subordinate(&self) -> bool {
        matches!(self.tag(), "IN" | "WRB")
            && is_subordinator(self.word())
            && self.pos + 1 < self.tokens.len()
    }

    fn clause(&mut self) -> Option<ParseTree> {
        let mut children = Vec::new();
        loop {
            let tag = self.tag();
            if self.at_end() {
                break;
            } else if self.starts_subordinate() {
                let marker = self.take_leaf();
                let mut sbar = vec![marker];
                sbar.extend(self.clause());
                children.push(ParseTree::phrase(Label::Sbar, sbar));
            } else if tag == "IN" {
                match self.prep_phrase() {
                    Some(pp) => children.push(pp),
                    None => break,
                }
            } else if is_adverb_tag(tag) {
                let adverb = self.take_leaf();
                children.push(ParseTree::phrase(Label::Advp, vec![adverb]));
            } else if tag == "," && !children.is_empty() {
                children.push(self.take_leaf());
            } else {
                break;
            }
        }

        if let Some(subject) = self.noun_phrase(true, false) {
            children.push(subject);
        }
        if let Some(vp) = self.verb_phrase() {
            children.push(vp);
        }
        if children.is_empty() {
            None
        } else {
            Some(ParseTree::phrase(Label::S, children))
        }
    }

    /// Determiner, modifiers and nominal head, with trailing possessives.
    fn base_np(&mut self) -> Option<ParseTree> {
        let start = self.pos;
        if matches!(self.tag(), "PRP" | "EX") {
            return Some(ParseTree::phrase(Label::Np, vec![self.take_leaf()]));
        }

        let mut possessor: Option<ParseTree> = None;
        let mut from = start;
        loop {
            let mut i = from;
            let mut determiner_end = None;
            if possessor.is_none() {
                if self.tag_at(i) == "PDT" {
                    i += 1;
                }
                if matches!(self.tag_at(i), "DT" | "PRP$" | "WP$") {
                    i += 1;
                    determiner_end = Some(i);
                }
            }
            let mut end = None;
            let mut last_adjective = None;
            loop {
                let tag = self.tag_at(i);
                let next = self.tag_at(i + 1);
                if is_noun_tag(tag) || tag == "CD" {
                    i += 1;
                    end = Some(i);
                } else if is_adjective_tag(tag) {
                    i += 1;
                    last_adjective = Some(i);
                } else if (is_adverb_tag(tag) && is_adjective_tag(next))
                    || (matches!(tag, "VBG" | "VBN") && is_noun_tag(next))
                {
                    i += 1;
                } else {
                    break;
                }
            }
            let determined = determiner_end.is_some();
            let end = end
                .or(if determined { last_adjective } else { None })
                .or(if self.tag_at(from) == "DT" { determiner_end } else { None });

            let Some(end) = end else {
                if let Some(possessor) = possessor {
                    self.pos = from;
                    return Some(possessor);
                }
                self.pos = start;
                return None;
            };

            let mut children: Vec<ParseTree> = possessor.take().into_iter().collect();
            children.extend(self.leaves(from, end));
            if self.tag_at(end) == "POS" {
                children.extend(self.leaves(end, end + 1));
                possessor = Some(ParseTree::phrase(Label::Np, children));
                from = end + 1;
                continue;
            }
            self.pos = end;
            return Some(ParseTree::phrase(Label::Np, children));
        }
    }

    fn starts_np(&self) -> bool {
        let tag = self.tag();
        matches!(tag, "DT" | "PDT" | "PRP$" | "PRP" | "EX" | "CD" | "WP$")
            || is_noun_tag(tag)
            || is_adjective_tag(tag)
    }

    /// A noun phrase with post-modifiers: prepositional attachments,
    /// relative clauses, appositions and coordination.
    ///
    /// In object position a coordinated noun phrase followed by a verb is left
    /// alone, since it starts a new clause.
    fn noun_phrase(&mut self, attach_pps: bool, object: bool) -> Option<ParseTree> {
        if !self.starts_np() {
            return None;
        }
        let mut head = self.base_np()?;

        loop {
            let tag = self.tag();
            if tag == "IN"
                && (attach_pps || self.word().eq_ignore_ascii_case("of"))
                && !self.starts_subordinate()
            {
                match self.prep_phrase() {
                    Some(pp) => head = ParseTree::phrase(Label::Np, vec![head, pp]),
                    None => break,
                }
            } else if is_wh_tag(tag) {
                let sbar = self.relative_clause();
                head = ParseTree::phrase(Label::Np, vec![head, sbar]);
            } else if tag == "," && is_wh_tag(self.tag_at(self.pos + 1)) {
                let mut children = vec![head, self.take_leaf()];
                children.push(self.relative_clause());
                if self.tag() == "," {
                    children.push(self.take_leaf());
                }
                head = ParseTree::phrase(Label::Np, children);
            } else {
                break;
            }
        }

        let mut items = vec![head];
        loop {
            let saved = self.pos;
            match self.tag() {
                "CC" => {
                    let conjunction = self.take_leaf();
                    match self.noun_phrase(attach_pps, object) {
                        Some(next) if !(object && is_verb_tag(self.tag())) => {
                            items.push(conjunction);
                            items.push(next);
                        }
                        _ => {
                            self.pos = saved;
                            break;
                        }
                    }
                }
                "," => {
                    let comma = self.take_leaf();
                    let Some(next) = self.noun_phrase(false, object) else {
                        self.pos = saved;
                        break;
                    };
                    let after = self.tag();
                    let following = self.tag_at(self.pos + 1);
                    let list_continues = after == "CC"
                        || (after == "," && following != "CC" && !is_verb_tag(following));
                    if list_continues {
                        items.push(comma);
                        items.push(next);
                    } else if items.len() == 1
                        && ((after == "," && is_verb_tag(following))
                            || after == "."
                            || after.is_empty())
                    {
                        let mut children = vec![items.remove(0), comma, next];
                        if after == "," {
                            children.push(self.take_leaf());
                        }
                        items.push(ParseTree::phrase(Label::Np, children));
                        break;
                    } else {
                        self.pos = saved;
                        break;
                    }
                }
                _ => break,
            }
        }

        if items.len() == 1 {
            items.pop()
        } else {
            Some(ParseTree::phrase(Label::Np, items))
        }
    }

    fn prep_phrase(&mut self) -> Option<ParseTree> {
        let saved = self.pos;
        let preposition = self.take_leaf();
        if let Some(np) = self.noun_phrase(false, true) {
            return Some(ParseTree::phrase(Label::Pp, vec![preposition, np]));
        }
        if self.tag() == "VBG" {
            if let Some(vp) = self.verb_phrase() {
                let clause = ParseTree::phrase(Label::S, vec![vp]);
                return Some(ParseTree::phrase(Label::Pp, vec![preposition, clause]));
            }
        }
        self.pos = saved;
        None
    }

    fn relative_clause(&mut self) -> ParseTree {
        let wh = self.take_leaf();
        let whnp = ParseTree::phrase(Label::Whnp, vec![wh]);
        let mut clause = Vec::new();
        if !is_verb_tag(self.tag()) {
            let saved = self.pos;
            match self.noun_phrase(false, false) {
                Some(subject) if is_verb_tag(self.tag()) => clause.push(subject),
                _ => self.pos = saved,
            }
        }
        if let Some(vp) = self.verb_phrase() {
            clause.push(vp);
        }
        let mut children = vec![whnp];
        if !clause.is_empty() {
            children.push(ParseTree::phrase(Label::S, clause));
        }
        ParseTree::phrase(Label::Sbar, children)
    }

    fn verb_phrase(&mut self) -> Option<ParseTree> {
        let start = self.pos;
        let mut children = Vec::new();
        while self.is_auxiliary(self.pos) {
            children.push(self.take_leaf());
            while is_adverb_tag(self.tag()) {
                children.push(self.take_leaf());
            }
        }
        if is_verb_tag(self.tag()) {
            children.push(self.take_leaf());
        } else if children.is_empty() {
            return None;
        } else {
            self.pos = start;
            return None;
        }

        loop {
            let tag = self.tag();
            if self.at_end() || is_clause_break(tag) || is_verb_tag(tag) {
                break;
            }
            if tag == "CC" {
                let after = self.tag_at(self.next_non_adverb(self.pos + 1));
                if !is_verb_tag(after) {
                    break;
                }
                let first = ParseTree::phrase(Label::Vp, std::mem::take(&mut children));
                let conjunction = self.take_leaf();
                let mut coordinated = vec![first, conjunction];
                while is_adverb_tag(self.tag()) {
                    coordinated.push(ParseTree::phrase(Label::Advp, vec![self.take_leaf()]));
                }
                coordinated.extend(self.verb_phrase());
                return Some(ParseTree::phrase(Label::Vp, coordinated));
            }
            if tag == "TO" && is_verb_tag(self.tag_at(self.pos + 1)) {
                let to = self.take_leaf();
                let mut inner = vec![to];
                inner.extend(self.verb_phrase());
                children.push(ParseTree::phrase(Label::Vp, inner));
            } else if self.starts_subordinate()
                || (tag == "IN" && self.word().eq_ignore_ascii_case("that"))
            {
                let marker = self.take_leaf();
                let mut sbar = vec![marker];
                sbar.extend(self.clause());
                children.push(ParseTree::phrase(Label::Sbar, sbar));
            } else if matches!(tag, "IN" | "TO") {
                match self.prep_phrase() {
                    Some(pp) => children.push(pp),
                    None => children.push(self.take_leaf()),
                }
            } else if is_wh_tag(tag) {
                children.push(self.relative_clause());
            } else if let Some(np) = self.noun_phrase(false, true) {
                children.push(np);
            } else if is_adjective_tag(tag)
                || (is_adverb_tag(tag)
                    && is_adjective_tag(self.tag_at(self.next_non_adverb(self.pos))))
            {
                let mut adjp = Vec::new();
                while is_adverb_tag(self.tag()) {
                    adjp.push(self.take_leaf());
                }
                while is_adjective_tag(self.tag()) {
                    adjp.push(self.take_leaf());
                }
                children.push(ParseTree::phrase(Label::Adjp, adjp));
            } else if is_adverb_tag(tag) || tag == "RP" {
                children.push(ParseTree::phrase(Label::Advp, vec![self.take_leaf()]));
            } else {
                children.push(self.take_leaf());
            }
        }
        Some(ParseTree::phrase(Label::Vp, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{PosTagger, WordTokenizer};

    fn parse(sentence: &str) -> String {
        let tokens = WordTokenizer.tokenize(sentence);
        let tagged = PosTagger.tag(&tokens);
        ConstituencyParser.parse(&tagged).to_string()
    }

    #[test]
    fn active_clause() {
        insta::assert_snapshot!(
            parse("John kicked the ball."),
            @"(ROOT (S (NP (NNP John)) (VP (VBD kicked) (NP (DT the) (NN ball))) (. .)))"
        );
    }

    #[test]
    fn passive_clause() {
        insta::assert_snapshot!(
            parse("The ball was kicked by John."),
            @"(ROOT (S (NP (DT The) (NN ball)) (VP (VBD was) (VBN kicked) (PP (IN by) (NP (NNP John)))) (. .)))"
        );
    }

    #[test]
    fn relative_clause_on_subject() {
        insta::assert_snapshot!(
            parse("The man that has taken the prize left."),
            @"(ROOT (S (NP (NP (DT The) (NN man)) (SBAR (WHNP (WDT that)) (S (VP (VBZ has) (VBN taken) (NP (DT the) (NN prize)))))) (VP (VBD left)) (. .)))"
        );
    }

    #[test]
    fn possessive_noun_phrase() {
        insta::assert_snapshot!(
            parse("Mary's students work hard."),
            @"(ROOT (S (NP (NP (NNP Mary) (POS 's)) (NNS students)) (VP (VBP work) (ADJP (JJ hard))) (. .)))"
        );
    }

    #[test]
    fn coordinated_clauses() {
        insta::assert_snapshot!(
            parse("John kicked the ball and Mary caught it."),
            @"(ROOT (S (S (NP (NNP John)) (VP (VBD kicked) (NP (DT the) (NN ball)))) (CC and) (S (NP (NNP Mary)) (VP (VBD caught) (NP (PRP it)))) (. .)))"
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(ConstituencyParser.parse(&[]).to_string(), "(ROOT)");
    }

    #[test]
    fn every_token_is_kept() {
        let sentence = "However , the results , which surprised many researchers , \
                        were not conclusive because the sample was small .";
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let tagged = PosTagger.tag(&tokens);
        let tree = ConstituencyParser.parse(&tagged);
        let words: Vec<&str> = tree.leaves().iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, tokens);
    }
}
