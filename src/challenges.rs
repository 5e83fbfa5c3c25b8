//! The 30-day challenge tracker: static definitions, evidence matching, and
//! the Ramadan day index.

use chrono::NaiveDate;

use crate::names;

/// What a challenge asks for. One tagged variant per challenge type, so
/// matching is never a stringly-typed comparison on an overloaded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Read a specific juz'.
    Juz(u32),
    /// Complete the whole Qur'an (reported as reaching juz' 30).
    FullQuran,
    /// Perform a tracked act of worship, identified by a fixed id.
    Worship(&'static str),
    /// Reach a dhikr count on a specific tasbih.
    Tasbih {
        id: &'static str,
        required: Option<u32>,
    },
    /// Only awarded through the explicit manual-completion call.
    Manual,
}

/// What a client reports having done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    Juz(u32),
    Worship(String),
    Tasbih { id: String, count: u32 },
}

impl Target {
    pub fn matches(&self, evidence: &Evidence) -> bool {
        match (self, evidence) {
            (Target::Juz(target), Evidence::Juz(juz)) => juz == target,
            (Target::FullQuran, Evidence::Juz(juz)) => *juz == 30,
            (Target::Worship(target), Evidence::Worship(id)) => id == target,
            (Target::Tasbih { id: target, required }, Evidence::Tasbih { id, count }) => {
                id == target && required.is_none_or(|needed| *count >= needed)
            }
            (Target::Manual, _) => false,
            _ => false,
        }
    }

    /// The wire-visible type tag, matching what clients report.
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Juz(_) | Target::FullQuran => "khatmah",
            Target::Worship(_) => "worship",
            Target::Tasbih { .. } => "tasbih",
            Target::Manual => "manual",
        }
    }
}

impl Evidence {
    /// Builds evidence from the loosely-typed smart-completion report.
    /// Khatmah values arrive as a number or a numeric string.
    pub fn from_report(kind: &str, value: Option<&serde_json::Value>, count: Option<u32>) -> Option<Evidence> {
        match kind {
            "khatmah" => {
                let juz = match value? {
                    serde_json::Value::Number(n) => n.as_u64()? as u32,
                    serde_json::Value::String(s) => s.trim().parse().ok()?,
                    _ => return None,
                };
                Some(Evidence::Juz(juz))
            }
            "worship" => Some(Evidence::Worship(value?.as_str()?.to_owned())),
            "tasbih" => Some(Evidence::Tasbih {
                id: value?.as_str()?.to_owned(),
                count: count.unwrap_or(0),
            }),
            _ => None,
        }
    }
}

pub struct Challenge {
    pub day: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub points: i64,
    pub target: Target,
}

pub fn for_day(day: u32) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|c| c.day == day)
}

/// 1-based Ramadan day index for the challenge tracker, clamped to the season
/// length. Pure function of the season start date, independent of the
/// competition state machine.
pub fn current_day(today: NaiveDate, season_start: NaiveDate) -> u32 {
    let days = (today - season_start).num_days() + 1;
    days.clamp(1, names::SEASON_MAX_DAYS as i64) as u32
}

macro_rules! challenge {
    ($day:expr, $name:expr, $desc:expr, $emoji:expr, $points:expr, $target:expr) => {
        Challenge {
            day: $day,
            name: $name,
            description: $desc,
            emoji: $emoji,
            points: $points,
            target: $target,
        }
    };
}

pub static CHALLENGES: &[Challenge] = &[
    challenge!(1, "قراءة الجزء الأول", "اقرأ الجزء الأول من القرآن", "📖", 100, Target::Juz(1)),
    challenge!(2, "صلاة التراويح كاملة", "صلِّ التراويح كاملة في المسجد", "🕌", 150, Target::Worship("taraweeh")),
    challenge!(3, "إطعام صائم", "قدم وجبة إفطار لصائم", "🍽️", 200, Target::Manual),
    challenge!(4, "صلة الرحم", "تواصل مع أقاربك اليوم", "👨‍👩‍👧‍👦", 100, Target::Manual),
    challenge!(5, "الاستغفار 1000 مرة", "أكثر من الاستغفار اليوم", "🤲", 150, Target::Tasbih { id: "istighfar", required: Some(1000) }),
    challenge!(6, "الصدقة", "تصدق بمبلغ ولو بسيط", "💝", 200, Target::Worship("sadaqah")),
    challenge!(7, "حفظ 5 آيات", "احفظ 5 آيات جديدة", "📚", 250, Target::Manual),
    challenge!(8, "صلاة الضحى", "صلِّ صلاة الضحى", "☀️", 100, Target::Worship("dhuha")),
    challenge!(9, "قيام الليل", "صلِّ في الثلث الأخير من الليل", "🌙", 200, Target::Worship("tahajjud")),
    challenge!(10, "ختم الجزء عم", "اختم الجزء 30 كاملاً", "✨", 300, Target::Juz(30)),
    challenge!(11, "الدعاء للوالدين", "ادعُ لوالديك 100 مرة", "❤️", 100, Target::Manual),
    challenge!(12, "مساعدة محتاج", "ساعد شخصاً محتاجاً اليوم", "🤝", 200, Target::Manual),
    challenge!(13, "الصلاة على النبي 1000", "صلِّ على النبي 1000 مرة", "💚", 150, Target::Tasbih { id: "salawat", required: Some(1000) }),
    challenge!(14, "قراءة سورة الكهف", "اقرأ سورة الكهف كاملة", "📖", 150, Target::Manual),
    challenge!(15, "نصف رمضان!", "راجع أهدافك وجدد نيتك", "🎯", 100, Target::Manual),
    challenge!(16, "التسبيح 100 مرة", "سبحان الله وبحمده 100 مرة", "📿", 100, Target::Tasbih { id: "subhanbihamdi", required: Some(100) }),
    challenge!(17, "إفطار جماعي", "أفطر مع عائلتك أو أصدقائك", "👨‍👩‍👧‍👦", 150, Target::Manual),
    challenge!(18, "قراءة أذكار كاملة", "أذكار الصباح والمساء", "📿", 100, Target::Worship("tasbih")),
    challenge!(19, "الاعتكاف ساعة", "اعتكف في المسجد ساعة", "🕌", 200, Target::Manual),
    challenge!(20, "دخول العشر الأواخر", "نوِّ الاجتهاد في العشر", "🌟", 150, Target::Manual),
    challenge!(21, "ليلة وتر", "أحيِ الليلة الأولى من الوتر", "✨", 300, Target::Worship("tahajjud")),
    challenge!(22, "قيام الليل كاملاً", "صلِّ قيام الليل كاملاً", "🌙", 300, Target::Worship("tahajjud")),
    challenge!(23, "ليلة وتر", "أحيِ الليلة الثالثة من الوتر", "✨", 300, Target::Worship("tahajjud")),
    challenge!(24, "الدعاء ساعة كاملة", "ادعُ الله ساعة متواصلة", "🤲", 250, Target::Worship("dua")),
    challenge!(25, "ليلة وتر", "أحيِ الليلة الخامسة من الوتر", "✨", 300, Target::Worship("tahajjud")),
    challenge!(26, "زكاة الفطر", "أخرج زكاة الفطر", "💰", 200, Target::Manual),
    challenge!(27, "ليلة القدر", "أحيِ ليلة السابع والعشرين", "🌟", 500, Target::Worship("tahajjud")),
    challenge!(28, "ختم القرآن", "اختم القرآن مرة على الأقل", "📖", 400, Target::FullQuran),
    challenge!(29, "ليلة وتر", "أحيِ الليلة التاسعة من الوتر", "✨", 300, Target::Worship("tahajjud")),
    challenge!(30, "وداع رمضان", "ودع رمضان بالدعاء والشكر", "🤲", 200, Target::Worship("dua")),
];
