//! Hand-authored adventure levels.
//!
//! Lookup is 1-based and clamps to the authored range, so adventure mode
//! never fails on a level past the end of the table.

use crate::domain::cards_types::Pair;
use crate::domain::settings::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry {
    pub word_en: &'static str,
    pub word_zh: &'static str,
    pub emoji: &'static str,
}

impl LevelEntry {
    pub fn word(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.word_en,
            Language::Zh => self.word_zh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelData {
    pub level: u32,
    pub topic_en: &'static str,
    pub topic_zh: &'static str,
    pub pairs_count: usize,
    pub content: &'static [LevelEntry],
}

impl LevelData {
    pub fn topic(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.topic_en,
            Language::Zh => self.topic_zh,
        }
    }

    /// Pairs for this level in the requested language.
    pub fn pairs(&self, language: Language) -> Vec<Pair> {
        self.content
            .iter()
            .take(self.pairs_count)
            .map(|entry| Pair::new(entry.word(language), entry.emoji))
            .collect()
    }
}

const fn entry(word_en: &'static str, word_zh: &'static str, emoji: &'static str) -> LevelEntry {
    LevelEntry {
        word_en,
        word_zh,
        emoji,
    }
}

static STATIC_LEVELS: [LevelData; 6] = [
    LevelData {
        level: 1,
        topic_en: "Fruit Basket",
        topic_zh: "水果篮子",
        pairs_count: 4,
        content: &[
            entry("Apple", "苹果", "🍎"),
            entry("Banana", "香蕉", "🍌"),
            entry("Grape", "葡萄", "🍇"),
            entry("Watermelon", "西瓜", "🍉"),
        ],
    },
    LevelData {
        level: 2,
        topic_en: "Cute Animals",
        topic_zh: "可爱的动物",
        pairs_count: 6,
        content: &[
            entry("Dog", "小狗", "🐶"),
            entry("Cat", "小猫", "🐱"),
            entry("Pig", "小猪", "🐷"),
            entry("Monkey", "猴子", "🐵"),
            entry("Rabbit", "兔子", "🐰"),
            entry("Panda", "熊猫", "🐼"),
        ],
    },
    LevelData {
        level: 3,
        topic_en: "Weather",
        topic_zh: "天气变化",
        pairs_count: 8,
        content: &[
            entry("Sun", "太阳", "☀️"),
            entry("Rain", "下雨", "🌧️"),
            entry("Snow", "下雪", "❄️"),
            entry("Lightning", "闪电", "⚡"),
            entry("Cloud", "云朵", "☁️"),
            entry("Rainbow", "彩虹", "🌈"),
            entry("Wind", "微风", "💨"),
            entry("Umbrella", "雨伞", "☂️"),
        ],
    },
    LevelData {
        level: 4,
        topic_en: "Sports",
        topic_zh: "体育运动",
        pairs_count: 8,
        content: &[
            entry("Soccer", "足球", "⚽"),
            entry("Basketball", "篮球", "🏀"),
            entry("Tennis", "网球", "🎾"),
            entry("Swimming", "游泳", "🏊"),
            entry("Cycling", "骑行", "🚴"),
            entry("Running", "跑步", "🏃"),
            entry("Medal", "奖牌", "🥇"),
            entry("Trophy", "奖杯", "🏆"),
        ],
    },
    LevelData {
        level: 5,
        topic_en: "Transportation",
        topic_zh: "交通工具",
        pairs_count: 10,
        content: &[
            entry("Car", "汽车", "🚗"),
            entry("Bus", "公交车", "🚌"),
            entry("Train", "火车", "🚆"),
            entry("Airplane", "飞机", "✈️"),
            entry("Ship", "轮船", "🚢"),
            entry("Rocket", "火箭", "🚀"),
            entry("Bicycle", "自行车", "🚲"),
            entry("Police Car", "警车", "🚓"),
            entry("Ambulance", "救护车", "🚑"),
            entry("Fire Truck", "消防车", "🚒"),
        ],
    },
    LevelData {
        level: 6,
        topic_en: "Space & Science",
        topic_zh: "太空与科学",
        pairs_count: 12,
        content: &[
            entry("Alien", "外星人", "👽"),
            entry("Astronaut", "宇航员", "👨‍🚀"),
            entry("Planet", "行星", "🪐"),
            entry("Telescope", "望远镜", "🔭"),
            entry("Microscope", "显微镜", "🔬"),
            entry("DNA", "DNA", "🧬"),
            entry("Atom", "原子", "⚛️"),
            entry("Robot", "机器人", "🤖"),
            entry("Satellite", "卫星", "🛰️"),
            entry("Star", "星星", "⭐"),
            entry("Meteor", "流星", "☄️"),
            entry("Earth", "地球", "🌍"),
        ],
    },
];

/// Number of authored levels.
pub fn last_level() -> u32 {
    STATIC_LEVELS.len() as u32
}

/// Level data for 1-based `level`, clamped to `[1, last_level()]`.
pub fn level_at(level: u32) -> &'static LevelData {
    let index = level.clamp(1, last_level()) as usize - 1;
    &STATIC_LEVELS[index]
}

pub fn all_levels() -> &'static [LevelData] {
    &STATIC_LEVELS
}
