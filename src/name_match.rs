use once_cell::sync::Lazy;
use strsim::normalized_levenshtein;

pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Short/alternate spellings mapped to the name that standings sources use.
/// Order matters: strategy 3 walks the pairs in declaration order and takes
/// the first candidate hit. Known-fuzzy: a short form that is a substring of
/// a longer target can fire for the wrong club; callers treat a miss or an
/// odd hit as "ranking unknown", never as an error.
static NAME_ALIASES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        // Premier League
        ("wolves", "wolverhampton"),
        ("spurs", "tottenham"),
        ("man utd", "manchester united"),
        ("man united", "manchester united"),
        ("man city", "manchester city"),
        ("newcastle", "newcastle united"),
        ("west ham", "west ham united"),
        ("brighton", "brighton and hove albion"),
        ("leeds", "leeds united"),
        ("leicester", "leicester city"),
        ("norwich", "norwich city"),
        ("nottingham", "nottingham forest"),
        ("nott'ham forest", "nottingham forest"),
        ("sheffield", "sheffield united"),
        ("luton", "luton town"),
        ("bournemouth", "afc bournemouth"),
        // La Liga
        ("atletico madrid", "atlético madrid"),
        ("atletico", "atlético"),
        ("athletic club", "athletic bilbao"),
        ("athletic", "athletic bilbao"),
        ("betis", "real betis"),
        ("celta", "celta vigo"),
        ("alaves", "alavés"),
        ("cadiz", "cádiz"),
        ("almeria", "almería"),
        ("leganes", "leganés"),
        // Bundesliga
        ("bayern", "bayern munich"),
        ("bayern münchen", "bayern munich"),
        ("dortmund", "borussia dortmund"),
        ("borussia m'gladbach", "borussia mönchengladbach"),
        ("monchengladbach", "mönchengladbach"),
        ("gladbach", "mönchengladbach"),
        ("mgladbach", "mönchengladbach"),
        ("leverkusen", "bayer leverkusen"),
        ("bayer 04 leverkusen", "bayer leverkusen"),
        ("rb leipzig", "rasenballsport leipzig"),
        ("leipzig", "rasenballsport leipzig"),
        ("wolfsburg", "vfl wolfsburg"),
        ("frankfurt", "eintracht frankfurt"),
        ("koln", "köln"),
        ("cologne", "köln"),
        ("fc koln", "fc köln"),
        ("1. fc köln", "köln"),
        ("union berlin", "1. fc union berlin"),
        ("hertha", "hertha bsc"),
        ("hertha berlin", "hertha bsc"),
        ("schalke", "schalke 04"),
        ("mainz", "mainz 05"),
        ("freiburg", "sc freiburg"),
        ("hoffenheim", "tsg hoffenheim"),
        ("augsburg", "fc augsburg"),
        ("stuttgart", "vfb stuttgart"),
        ("bochum", "vfl bochum"),
        ("werder", "werder bremen"),
        ("heidenheim", "1. fc heidenheim"),
        ("darmstadt", "sv darmstadt 98"),
        // Ligue 1
        ("psg", "paris saint-germain"),
        ("paris sg", "paris saint-germain"),
        ("paris", "paris saint-germain"),
        ("monaco", "as monaco"),
        ("marseille", "olympique marseille"),
        ("om", "olympique marseille"),
        ("olympique de marseille", "olympique marseille"),
        ("lille", "losc lille"),
        ("losc", "losc lille"),
        ("lille osc", "losc lille"),
        ("lyon", "olympique lyon"),
        ("ol", "olympique lyon"),
        ("olympique lyonnais", "olympique lyon"),
        ("nice", "ogc nice"),
        ("lens", "rc lens"),
        ("racing club de lens", "rc lens"),
        ("rennes", "stade rennais"),
        ("stade rennais fc", "stade rennais"),
        ("strasbourg", "rc strasbourg"),
        ("racing club de strasbourg", "rc strasbourg"),
        ("rc strasbourg alsace", "rc strasbourg"),
        ("reims", "stade reims"),
        ("stade de reims", "stade reims"),
        ("brest", "stade brestois"),
        ("stade brestois 29", "stade brestois"),
        ("nantes", "fc nantes"),
        ("montpellier", "montpellier hsc"),
        ("toulouse", "fc toulouse"),
        ("saint-etienne", "as saint-étienne"),
        ("saint etienne", "as saint-étienne"),
        ("st etienne", "as saint-étienne"),
        ("asse", "as saint-étienne"),
        ("auxerre", "aj auxerre"),
        ("angers", "angers sco"),
        ("le havre", "havre ac"),
        ("havre", "havre ac"),
        ("bordeaux", "fc girondins de bordeaux"),
        ("girondins", "fc girondins de bordeaux"),
        // Serie A
        ("inter", "inter milan"),
        ("inter milan", "internazionale"),
        ("internazionale", "inter"),
        ("fc internazionale milano", "inter milan"),
        ("milan", "ac milan"),
        ("ac milan", "milan"),
        ("juve", "juventus"),
        ("juventus fc", "juventus"),
        ("roma", "as roma"),
        ("as roma", "roma"),
        ("lazio", "ss lazio"),
        ("ss lazio", "lazio"),
        ("napoli", "ssc napoli"),
        ("ssc napoli", "napoli"),
        ("fiorentina", "acf fiorentina"),
        ("acf fiorentina", "fiorentina"),
        ("atalanta", "atalanta bc"),
        ("verona", "hellas verona"),
        ("hellas verona fc", "hellas verona"),
        ("bologna", "bologna fc"),
        ("torino", "torino fc"),
        ("genoa", "genoa cfc"),
        ("sampdoria", "uc sampdoria"),
        ("udinese", "udinese calcio"),
        ("cagliari", "cagliari calcio"),
        ("parma", "parma calcio"),
        ("empoli", "empoli fc"),
        ("sassuolo", "us sassuolo"),
        ("spezia", "spezia calcio"),
        ("venezia", "venezia fc"),
        ("salernitana", "us salernitana"),
        ("monza", "ac monza"),
        ("cremonese", "us cremonese"),
        ("lecce", "us lecce"),
    ]
});

/// Resolve a free-text team name against a candidate list. Four strategies in
/// strict priority order; the first success wins. `None` is an expected
/// outcome (newly promoted sides, cup opponents, typos beyond repair) and
/// means "ranking unknown" downstream.
pub fn resolve_team_name<'a>(
    target: &str,
    candidates: &'a [String],
    threshold: f64,
) -> Option<&'a str> {
    let target = target.trim().to_lowercase();

    // Strategy 1: exact match, case/whitespace-insensitive.
    for candidate in candidates {
        if candidate.trim().to_lowercase() == target {
            return Some(candidate);
        }
    }

    // Strategy 2: containment either way, first candidate in list order.
    for candidate in candidates {
        let lower = candidate.trim().to_lowercase();
        if lower.contains(&target) || target.contains(&lower) {
            return Some(candidate);
        }
    }

    // Strategy 3: alias table.
    for (short, full) in NAME_ALIASES.iter() {
        if target.contains(short) || short.contains(target.as_str()) {
            for candidate in candidates {
                let lower = candidate.to_lowercase();
                if lower.contains(full) || lower.contains(short) {
                    return Some(candidate);
                }
            }
        }
    }

    // Strategy 4: fuzzy similarity, strictly-best ratio above the threshold;
    // ties keep the first-seen candidate.
    let mut best: Option<&str> = None;
    let mut best_ratio = 0.0_f64;
    for candidate in candidates {
        let ratio = normalized_levenshtein(&target, &candidate.to_lowercase());
        if ratio > best_ratio && ratio >= threshold {
            best_ratio = ratio;
            best = Some(candidate);
        }
    }
    best
}
