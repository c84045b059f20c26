use crate::model::ids::{JUZ_COUNT, JuzId};

/// One fixed section of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Juz {
    number: u8,
    name_arabic: &'static str,
    name_english: &'static str,
    start_surah: &'static str,
}

impl Juz {
    const fn new(
        number: u8,
        name_arabic: &'static str,
        name_english: &'static str,
        start_surah: &'static str,
    ) -> Self {
        Self {
            number,
            name_arabic,
            name_english,
            start_surah,
        }
    }

    #[must_use]
    pub fn id(&self) -> JuzId {
        JuzId::from_catalog(self.number)
    }

    #[must_use]
    pub fn name_arabic(&self) -> &'static str {
        self.name_arabic
    }

    #[must_use]
    pub fn name_english(&self) -> &'static str {
        self.name_english
    }

    /// Surah in which this Juz begins.
    #[must_use]
    pub fn start_surah(&self) -> &'static str {
        self.start_surah
    }
}

static CATALOG: [Juz; JUZ_COUNT as usize] = [
    Juz::new(1, "الم", "Alif Lam Meem", "Al-Fatiha"),
    Juz::new(2, "سيقول", "Sayaqool", "Al-Baqarah"),
    Juz::new(3, "تلك الرسل", "Tilkal Rusul", "Al-Baqarah"),
    Juz::new(4, "لن تنالوا", "Lan Tana Lu", "Aal-e-Imran"),
    Juz::new(5, "والمحصنات", "Wal Mohsanat", "An-Nisa"),
    Juz::new(6, "لا يحب الله", "La Yuhibbullah", "An-Nisa"),
    Juz::new(7, "وإذا سمعوا", "Wa Iza Samiu", "Al-Ma'idah"),
    Juz::new(8, "ولو أننا", "Wa Lau Annana", "Al-An'am"),
    Juz::new(9, "قال الملأ", "Qalal Malao", "Al-A'raf"),
    Juz::new(10, "واعلموا", "Wa A'lamu", "Al-Anfal"),
    Juz::new(11, "يعتذرون", "Yatazeroon", "At-Tawbah"),
    Juz::new(12, "وما من دابة", "Wa Mamin Da'abat", "Hud"),
    Juz::new(13, "وما أبرئ", "Wa Ma Ubrioo", "Yusuf"),
    Juz::new(14, "ربما", "Rubama", "Al-Hijr"),
    Juz::new(15, "سبحان الذي", "Subhanallazi", "Al-Isra"),
    Juz::new(16, "قال ألم", "Qal Alam", "Al-Kahf"),
    Juz::new(17, "اقترب للناس", "Aqtarabo", "Al-Anbiya"),
    Juz::new(18, "قد أفلح", "Qadd Aflaha", "Al-Mu'minun"),
    Juz::new(19, "وقال الذين", "Wa Qalallazina", "Al-Furqan"),
    Juz::new(20, "أمن خلق", "A'man Khalaq", "An-Naml"),
    Juz::new(21, "اتل ما أوحي", "Utlu Ma Oohi", "Al-Ankabut"),
    Juz::new(22, "ومن يقنت", "Wa Manyaqnut", "Al-Ahzab"),
    Juz::new(23, "وما لي", "Wa Mali", "Ya-Sin"),
    Juz::new(24, "فمن أظلم", "Faman Azlam", "Az-Zumar"),
    Juz::new(25, "إليه يرد", "Elahe Yuruddo", "Fussilat"),
    Juz::new(26, "حم", "Ha'a Meem", "Al-Ahqaf"),
    Juz::new(27, "قال فما خطبكم", "Qala Fama Khatbukum", "Adh-Dhariyat"),
    Juz::new(28, "قد سمع الله", "Qadd Sami Allah", "Al-Mujadila"),
    Juz::new(29, "تبارك الذي", "Tabarakallazi", "Al-Mulk"),
    Juz::new(30, "عم يتساءلون", "Amma Yatasa'aloon", "An-Naba"),
];

/// All 30 Juz in reading order.
#[must_use]
pub fn catalog() -> &'static [Juz] {
    &CATALOG
}

/// Looks up the catalog entry for an id.
#[must_use]
pub fn juz(id: JuzId) -> &'static Juz {
    // `JuzId` is always in 1..=30, so the index is in bounds.
    &CATALOG[usize::from(id.value() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_contiguous_and_ordered() {
        let entries = catalog();
        assert_eq!(entries.len(), 30);
        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(usize::from(entry.id().value()), idx + 1);
        }
    }

    #[test]
    fn every_entry_has_names() {
        for entry in catalog() {
            assert!(!entry.name_arabic().is_empty());
            assert!(!entry.name_english().is_empty());
            assert!(!entry.start_surah().is_empty());
        }
    }

    #[test]
    fn lookup_matches_id() {
        let id = JuzId::new(15).unwrap();
        assert_eq!(juz(id).id(), id);
        assert_eq!(juz(JuzId::FIRST).start_surah(), "Al-Fatiha");
    }
}
