use crate::preferences::Language;

/// Fixed UI strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub latest_heading: &'static str,
    pub previous_heading: &'static str,
    pub latest_badge: &'static str,
    pub no_latest: &'static str,
    pub no_previous: &'static str,
    pub load_failed: &'static str,
    pub load_more_hint: &'static str,
    pub end_of_feed: &'static str,
    pub loading: &'static str,
    pub audio: &'static str,
    pub commands: &'static str,
}

const ENGLISH: Labels = Labels {
    latest_heading: "Latest Update",
    previous_heading: "Previous Updates",
    latest_badge: "LATEST",
    no_latest: "No updates available at this time.",
    no_previous: "No previous updates available.",
    load_failed: "Failed to load updates. Please try again later.",
    load_more_hint: "Type `more` to load more updates.",
    end_of_feed: "You have reached the oldest update.",
    loading: "Loading updates...",
    audio: "Audio",
    commands: "Commands: more | refresh | theme | lang | quit",
};

const ITALIAN: Labels = Labels {
    latest_heading: "Ultimo aggiornamento",
    previous_heading: "Aggiornamenti precedenti",
    latest_badge: "ULTIMO",
    no_latest: "Nessun aggiornamento disponibile al momento.",
    no_previous: "Nessun aggiornamento precedente disponibile.",
    load_failed: "Impossibile caricare gli aggiornamenti. Riprova più tardi.",
    load_more_hint: "Scrivi `more` per caricare altri aggiornamenti.",
    end_of_feed: "Hai raggiunto l'aggiornamento più vecchio.",
    loading: "Caricamento degli aggiornamenti...",
    audio: "Audio",
    commands: "Comandi: more | refresh | theme | lang | quit",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::English => &ENGLISH,
        Language::Italian => &ITALIAN,
    }
}
