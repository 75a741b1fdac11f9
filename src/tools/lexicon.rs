//! Closed-class words and irregular forms of English.
//!
//! The tables here are the only "knowledge" the tagger and lemmatizer have;
//! everything else is suffix rules and context.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Closed-class words with their Penn Treebank tag.
const CLOSED_CLASS: &[(&str, &str)] = &[
    // determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("another", "DT"), ("either", "DT"), ("neither", "DT"),
    ("all", "DT"), ("both", "DT"), ("half", "PDT"), ("such", "JJ"), ("other", "JJ"),
    ("many", "JJ"), ("few", "JJ"), ("several", "JJ"),
    // pronouns
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"), ("himself", "PRP"),
    ("herself", "PRP"), ("itself", "PRP"), ("ourselves", "PRP"), ("themselves", "PRP"),
    ("one", "CD"), ("her", "PRP$"),
    // possessive determiners
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("its", "PRP$"), ("our", "PRP$"),
    ("their", "PRP$"),
    // prepositions and subordinators
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("with", "IN"),
    ("from", "IN"), ("for", "IN"), ("about", "IN"), ("into", "IN"), ("through", "IN"),
    ("over", "IN"), ("under", "IN"), ("between", "IN"), ("among", "IN"), ("after", "IN"),
    ("before", "IN"), ("during", "IN"), ("without", "IN"), ("within", "IN"),
    ("against", "IN"), ("across", "IN"), ("toward", "IN"), ("towards", "IN"),
    ("upon", "IN"), ("because", "IN"), ("although", "IN"), ("though", "IN"),
    ("while", "IN"), ("if", "IN"), ("since", "IN"), ("unless", "IN"), ("whereas", "IN"),
    ("as", "IN"), ("than", "IN"), ("like", "IN"), ("despite", "IN"), ("per", "IN"),
    ("via", "IN"), ("around", "IN"), ("behind", "IN"), ("beyond", "IN"), ("near", "IN"),
    ("until", "IN"), ("whether", "IN"), ("throughout", "IN"), ("onto", "IN"),
    ("to", "TO"),
    // conjunctions
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"),
    // modals
    ("can", "MD"), ("could", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"),
    ("shall", "MD"), ("should", "MD"), ("will", "MD"), ("would", "MD"), ("ca", "MD"),
    ("wo", "MD"),
    // wh-words
    ("which", "WDT"), ("whatever", "WDT"), ("who", "WP"), ("whom", "WP"), ("what", "WP"),
    ("whose", "WP$"), ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    // adverbs
    ("not", "RB"), ("never", "RB"), ("also", "RB"), ("very", "RB"), ("too", "RB"),
    ("always", "RB"), ("often", "RB"), ("only", "RB"), ("just", "RB"), ("even", "RB"),
    ("still", "RB"), ("already", "RB"), ("however", "RB"), ("then", "RB"), ("now", "RB"),
    ("here", "RB"), ("quite", "RB"), ("rather", "RB"), ("almost", "RB"), ("soon", "RB"),
    ("again", "RB"), ("therefore", "RB"), ("thus", "RB"), ("moreover", "RB"),
    ("furthermore", "RB"), ("instead", "RB"), ("perhaps", "RB"), ("sometimes", "RB"),
    ("together", "RB"), ("yet", "RB"), ("so", "RB"), ("there", "EX"), ("ever", "RB"),
    ("well", "RB"), ("much", "RB"), ("more", "RBR"), ("most", "RBS"), ("less", "RBR"),
    ("least", "RBS"),
];

/// Forms of "be", "have" and "do" with their tags.
const AUXILIARY_FORMS: &[(&str, &str, &str)] = &[
    ("be", "VB", "be"), ("am", "VBP", "be"), ("is", "VBZ", "be"), ("are", "VBP", "be"),
    ("was", "VBD", "be"), ("were", "VBD", "be"), ("been", "VBN", "be"),
    ("being", "VBG", "be"), ("'m", "VBP", "be"), ("'re", "VBP", "be"),
    ("have", "VBP", "have"), ("has", "VBZ", "have"), ("had", "VBD", "have"),
    ("having", "VBG", "have"), ("'ve", "VBP", "have"),
    ("do", "VBP", "do"), ("does", "VBZ", "do"), ("did", "VBD", "do"),
    ("done", "VBN", "do"), ("doing", "VBG", "do"),
];

/// Irregular verbs: (base, past, past participle).
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("arise", "arose", "arisen"), ("bear", "bore", "borne"), ("beat", "beat", "beaten"),
    ("become", "became", "become"), ("begin", "began", "begun"), ("bite", "bit", "bitten"),
    ("blow", "blew", "blown"), ("break", "broke", "broken"), ("bring", "brought", "brought"),
    ("build", "built", "built"), ("buy", "bought", "bought"), ("catch", "caught", "caught"),
    ("choose", "chose", "chosen"), ("come", "came", "come"), ("cut", "cut", "cut"),
    ("deal", "dealt", "dealt"), ("draw", "drew", "drawn"), ("drink", "drank", "drunk"),
    ("drive", "drove", "driven"), ("eat", "ate", "eaten"), ("fall", "fell", "fallen"),
    ("feed", "fed", "fed"), ("feel", "felt", "felt"), ("fight", "fought", "fought"),
    ("find", "found", "found"), ("fly", "flew", "flown"), ("forget", "forgot", "forgotten"),
    ("forgive", "forgave", "forgiven"), ("freeze", "froze", "frozen"),
    ("get", "got", "gotten"), ("give", "gave", "given"), ("go", "went", "gone"),
    ("grow", "grew", "grown"), ("hang", "hung", "hung"), ("hear", "heard", "heard"),
    ("hide", "hid", "hidden"), ("hit", "hit", "hit"), ("hold", "held", "held"),
    ("hurt", "hurt", "hurt"), ("keep", "kept", "kept"), ("know", "knew", "known"),
    ("lay", "laid", "laid"), ("lead", "led", "led"), ("leave", "left", "left"),
    ("lend", "lent", "lent"), ("let", "let", "let"), ("lie", "lay", "lain"),
    ("lose", "lost", "lost"), ("make", "made", "made"), ("mean", "meant", "meant"),
    ("meet", "met", "met"), ("overcome", "overcame", "overcome"), ("pay", "paid", "paid"),
    ("put", "put", "put"), ("read", "read", "read"), ("ride", "rode", "ridden"),
    ("ring", "rang", "rung"), ("rise", "rose", "risen"), ("run", "ran", "run"),
    ("say", "said", "said"), ("see", "saw", "seen"), ("seek", "sought", "sought"),
    ("sell", "sold", "sold"), ("send", "sent", "sent"), ("set", "set", "set"),
    ("shake", "shook", "shaken"), ("shoot", "shot", "shot"), ("show", "showed", "shown"),
    ("shut", "shut", "shut"), ("sing", "sang", "sung"), ("sit", "sat", "sat"),
    ("sleep", "slept", "slept"), ("slide", "slid", "slid"), ("speak", "spoke", "spoken"),
    ("spend", "spent", "spent"), ("stand", "stood", "stood"), ("steal", "stole", "stolen"),
    ("strike", "struck", "struck"), ("swear", "swore", "sworn"), ("swim", "swam", "swum"),
    ("take", "took", "taken"), ("teach", "taught", "taught"), ("tear", "tore", "torn"),
    ("tell", "told", "told"), ("think", "thought", "thought"), ("throw", "threw", "thrown"),
    ("understand", "understood", "understood"), ("undertake", "undertook", "undertaken"),
    ("wake", "woke", "woken"), ("wear", "wore", "worn"), ("weep", "wept", "wept"),
    ("win", "won", "won"), ("withdraw", "withdrew", "withdrawn"), ("write", "wrote", "written"),
];

/// Regular verbs common enough in student writing to be worth knowing by name.
const REGULAR_VERBS: &[&str] = &[
    "accept", "achieve", "add", "affect", "agree", "allow", "analyse", "analyze", "answer",
    "appear", "apply", "argue", "arrive", "ask", "assume", "attack", "avoid", "bark",
    "base", "believe", "belong", "borrow", "call", "cause", "change", "chase", "check",
    "claim", "clean", "climb", "close", "collect", "compare", "complete", "conclude",
    "confirm", "consider", "contain", "continue", "contribute", "cook", "cover", "create",
    "cross", "dance", "decide", "decline", "decrease", "deliver", "demonstrate", "depend",
    "describe", "design", "destroy", "determine", "develop", "die", "discover", "discuss",
    "dress", "drop", "earn", "emerge", "end", "enjoy", "enter", "escape", "establish",
    "examine", "exist", "expect", "experience", "explain", "fail", "fill", "finish", "fix",
    "focus", "follow", "form", "gather", "guess", "happen", "hate", "help", "hope",
    "hurry", "identify", "imagine", "improve", "include", "increase", "indicate",
    "influence", "inform", "intend", "introduce", "invite", "involve", "join", "jump",
    "kick", "kill", "kiss", "knock", "laugh", "learn", "lift", "like", "listen", "live",
    "look", "love", "manage", "mark", "marry", "matter", "measure", "mention", "mind",
    "miss", "move", "need", "note", "notice", "observe", "obtain", "occur", "offer",
    "open", "order", "own", "paint", "pass", "persist", "pick", "place", "plan", "plant",
    "play", "point", "prefer", "prepare", "present", "prevent", "produce", "promise",
    "propose", "protect", "prove", "provide", "publish", "pull", "push", "raise", "reach",
    "realize", "receive", "recognize", "record", "reduce", "refuse", "relate", "release",
    "rely", "remain", "remember", "remove", "repeat", "replace", "report", "represent",
    "require", "rest", "result", "return", "reveal", "save", "seem", "serve", "share",
    "shout", "smile", "solve", "sound", "start", "state", "stay", "stop", "study",
    "suffer", "suggest", "supply", "support", "surprise", "talk", "test", "thank",
    "touch", "train", "travel", "treat", "trust", "try", "turn", "use", "visit", "vote",
    "wait", "walk", "want", "wash", "watch", "wish", "wonder", "work", "worry",
];

/// Adjectives recognised without a suffix cue.
const ADJECTIVES: &[&str] = &[
    "actual", "additional", "annual", "bad", "big", "black", "blue", "brief", "central",
    "certain", "clear", "cold", "common", "critical", "crucial", "cultural", "dark",
    "different", "digital", "early", "easy", "economic", "effective", "environmental",
    "equal", "essential", "fast", "final", "financial", "fine", "formal", "free", "full",
    "general", "global", "good", "great", "green", "happy", "hard", "high", "hot", "human",
    "important", "individual", "international", "large", "late", "legal", "likely",
    "little", "local", "long", "low", "main", "major", "medical", "mental", "moral",
    "national", "natural", "necessary", "new", "normal", "official", "old", "original",
    "personal", "physical", "political", "poor", "possible", "potential", "practical",
    "professional", "public", "quick", "real", "recent", "red", "rich", "sad", "short",
    "significant", "similar", "simple", "slow", "small", "social", "special", "strong",
    "sure", "tall", "total", "traditional", "true", "false", "typical", "universal",
    "usual", "vital", "white", "whole", "wide", "wrong", "young",
];

/// Irregular comparative and superlative adjectives: (form, base).
const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("further", "far"), ("furthest", "far"), ("farther", "far"), ("farthest", "far"),
    ("elder", "old"), ("eldest", "old"),
];

/// Irregular noun plurals: (plural, singular).
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("people", "person"),
    ("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"),
    ("data", "datum"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
    ("analyses", "analysis"), ("hypotheses", "hypothesis"), ("theses", "thesis"),
    ("crises", "crisis"), ("lives", "life"), ("wives", "wife"), ("knives", "knife"),
    ("leaves", "leaf"), ("halves", "half"), ("selves", "self"), ("wolves", "wolf"),
];

/// Words ending in "-ly" that are not adverbs.
pub(crate) const LY_NON_ADVERBS: &[&str] = &[
    "family", "supply", "reply", "apply", "fly", "ally", "belly", "assembly", "july",
    "italy", "rely", "early", "likely", "only", "holy", "ugly", "friendly", "lonely",
];

/// Nouns ending in "-ing" that must not be read as gerunds.
pub(crate) const ING_NOUNS: &[&str] = &[
    "thing", "nothing", "something", "anything", "everything", "king", "ring", "wing",
    "spring", "string", "morning", "evening", "ceiling", "during", "building", "meeting",
    "feeling", "beginning", "finding", "training", "understanding",
];

/// Words ending in "-ed" that are not verb forms.
pub(crate) const ED_NON_VERBS: &[&str] = &[
    "bed", "red", "shed", "hundred", "speed", "seed", "need", "feed", "indeed", "sacred",
    "naked", "wicked", "kindred",
];

/// Surface forms of "be".
pub const BE_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re",
];

/// Surface forms of "have".
pub const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve"];

/// Surface forms of "get", used for get-passives.
pub const GET_FORMS: &[&str] = &["get", "gets", "got", "gotten", "getting"];

/// Words that open a subordinate clause.
pub const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "if", "since", "unless", "whereas",
    "whether", "when", "where", "once",
];

pub(crate) struct Lexicon {
    pub closed_class: HashMap<&'static str, &'static str>,
    pub auxiliaries: HashMap<&'static str, (&'static str, &'static str)>,
    /// past or participle form -> (base, is_past, is_participle)
    pub irregular_forms: HashMap<&'static str, (&'static str, bool, bool)>,
    pub verbs: HashSet<&'static str>,
    pub adjectives: HashSet<&'static str>,
    pub irregular_adjectives: HashMap<&'static str, &'static str>,
    pub irregular_nouns: HashMap<&'static str, &'static str>,
}

pub(crate) static LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let mut irregular_forms: HashMap<&'static str, (&'static str, bool, bool)> = HashMap::new();
    for &(base, past, participle) in IRREGULAR_VERBS {
        irregular_forms.insert(past, (base, true, past == participle));
        if past != participle {
            irregular_forms.insert(participle, (base, false, true));
        }
    }
    // a base form that doubles as its own participle ("come", "run") is a base form first
    for &(base, _, _) in IRREGULAR_VERBS {
        let participle_only = irregular_forms.get(base).map_or(false, |form| !form.1);
        if participle_only {
            irregular_forms.remove(base);
        }
    }

    let mut verbs: HashSet<&'static str> = REGULAR_VERBS.iter().copied().collect();
    verbs.extend(IRREGULAR_VERBS.iter().map(|&(base, _, _)| base));

    Lexicon {
        closed_class: CLOSED_CLASS.iter().copied().collect(),
        auxiliaries: AUXILIARY_FORMS
            .iter()
            .map(|&(form, tag, base)| (form, (tag, base)))
            .collect(),
        irregular_forms,
        verbs,
        adjectives: ADJECTIVES.iter().copied().collect(),
        irregular_adjectives: IRREGULAR_ADJECTIVES.iter().copied().collect(),
        irregular_nouns: IRREGULAR_NOUNS.iter().copied().collect(),
    }
});

pub fn is_be_form(word: &str) -> bool {
    BE_FORMS.contains(&word.to_lowercase().as_str())
}

pub fn is_have_form(word: &str) -> bool {
    HAVE_FORMS.contains(&word.to_lowercase().as_str())
}

pub fn is_get_form(word: &str) -> bool {
    GET_FORMS.contains(&word.to_lowercase().as_str())
}

pub fn is_subordinator(word: &str) -> bool {
    SUBORDINATORS.contains(&word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_participles_are_indexed() {
        assert_eq!(LEXICON.irregular_forms.get("taken"), Some(&("take", false, true)));
        assert_eq!(LEXICON.irregular_forms.get("took"), Some(&("take", true, false)));
        assert_eq!(LEXICON.irregular_forms.get("made"), Some(&("make", true, true)));
        // base forms stay base forms
        assert_eq!(LEXICON.irregular_forms.get("come"), None);
        assert_eq!(LEXICON.irregular_forms.get("run"), None);
    }

    #[test]
    fn verb_inventory_covers_both_tables() {
        assert!(LEXICON.verbs.contains("kick"));
        assert!(LEXICON.verbs.contains("run"));
        assert!(!LEXICON.verbs.contains("ball"));
    }
}
