// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword classification of merchant and memo text.
//!
//! Rules are evaluated in table order and the first rule with any keyword
//! contained in the normalized text wins. Keyword length or specificity never
//! matters, so a broad rule placed early shadows narrower rules after it.

use crate::models::{Category, OTHER};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub keywords: Vec<String>,
    pub category_name: String,
    pub category_icon: String,
}

impl ClassificationRule {
    pub fn new(keywords: &[&str], category: Category) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| normalize(k))
                .filter(|k| !k.is_empty())
                .collect(),
            category_name: category.name.to_string(),
            category_icon: category.icon.to_string(),
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category_name: String,
    pub category_icon: String,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
    fallback: Classified,
}

impl Classifier {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self {
            rules,
            fallback: Classified {
                category_name: OTHER.name.to_string(),
                category_icon: OTHER.icon.to_string(),
            },
        }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn classify(&self, text: Option<&str>) -> Classified {
        let normalized = match text.map(normalize) {
            Some(n) if !n.is_empty() => n,
            _ => return self.fallback.clone(),
        };
        self.rules
            .iter()
            .find(|r| r.matches(&normalized))
            .map(|r| Classified {
                category_name: r.category_name.clone(),
                category_icon: r.category_icon.clone(),
            })
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_lowercase()
}

fn cat(name: &'static str, icon: &'static str) -> Category {
    Category { name, icon }
}

// Dining and delivery precede transport so "uber eats" resolves to Food.
fn builtin_rules() -> Vec<ClassificationRule> {
    let food = cat("Food", "🍽️");
    let transport = cat("Transport", "🚗");
    let housing = cat("Housing", "🏠");
    let utilities = cat("Utilities", "⚡");
    let communication = cat("Communication", "📱");
    let medical = cat("Medical", "🏥");
    let clothing = cat("Clothing", "👕");
    let education = cat("Education", "📚");
    let entertainment = cat("Entertainment", "🎮");
    let daily = cat("Daily Goods", "🛒");
    let beauty = cat("Beauty", "✂️");
    let salary = cat("Salary", "💰");
    let bonus = cat("Bonus", "🎁");

    vec![
        ClassificationRule::new(
            &[
                "starbucks", "スターバックス", "スタバ", "mcdonald", "マクドナルド", "uber eats",
                "ubereats", "出前館", "restaurant", "レストラン", "cafe", "カフェ", "coffee",
                "doutor", "ドトール", "吉野家", "すき家", "松屋", "ramen", "ラーメン", "sushi",
                "寿司", "pizza", "kfc", "居酒屋", "lunch", "ランチ", "dinner",
            ],
            food,
        ),
        ClassificationRule::new(
            &[
                "スーパー", "supermarket", "イオン", "aeon", "西友", "seiyu", "ライフ", "grocery",
                "seven-eleven", "7-eleven", "セブン", "ファミリーマート", "familymart", "ローソン",
                "lawson", "コンビニ",
            ],
            food,
        ),
        ClassificationRule::new(
            &[
                "suica", "pasmo", "icoca", "jr東日本", "jr east", "metro", "メトロ",
                "電車", "train", "バス", "taxi", "タクシー", "uber", "go タクシー",
                "eneos", "ガソリン", "gasoline", "parking", "駐車場", "高速道路",
            ],
            transport,
        ),
        ClassificationRule::new(&["家賃", "管理費", "landlord", "apartment", "mortgage", "住宅ローン"], housing),
        ClassificationRule::new(
            &[
                "電気", "electric", "ガス", "gas", "水道", "water", "東京電力", "tepco", "東京ガス",
            ],
            utilities,
        ),
        ClassificationRule::new(
            &[
                "docomo", "ドコモ", "kddi", "softbank", "ソフトバンク", "rakuten mobile",
                "楽天モバイル", "ahamo", "povo", "wi-fi", "wifi", "internet", "光回線",
            ],
            communication,
        ),
        ClassificationRule::new(
            &[
                "病院", "hospital", "clinic", "クリニック", "薬局", "pharmacy", "歯科", "dental",
                "医院",
            ],
            medical,
        ),
        ClassificationRule::new(
            &[
                "uniqlo", "ユニクロ", "zara", "h&m", "しまむら", "apparel", "clothing",
            ],
            clothing,
        ),
        ClassificationRule::new(
            &[
                "bookstore", "書店", "本屋", "kindle", "紀伊國屋", "tuition", "学費", "塾", "seminar",
                "udemy", "course",
            ],
            education,
        ),
        ClassificationRule::new(
            &[
                "netflix", "spotify", "amazon prime", "prime video", "disney", "youtube",
                "nintendo", "任天堂", "playstation", "steam", "movie", "映画", "カラオケ",
                "karaoke", "ticket", "チケット",
            ],
            entertainment,
        ),
        ClassificationRule::new(
            &[
                "ドラッグストア", "drugstore", "マツモトキヨシ", "ダイソー", "daiso", "ニトリ",
                "nitori", "無印", "muji", "amazon", "アマゾン", "ikea", "ホームセンター",
            ],
            daily,
        ),
        ClassificationRule::new(
            &[
                "美容", "salon", "サロン", "hair", "ヘアカット", "barber", "理髪", "cosmetic",
                "コスメ", "nail", "ネイル",
            ],
            beauty,
        ),
        ClassificationRule::new(&["賞与", "ボーナス", "bonus"], bonus),
        ClassificationRule::new(&["給与", "給料", "salary", "payroll"], salary),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_full_width_and_case() {
        assert_eq!(normalize("  ＳＴＡＲＢＵＣＫＳ  "), "starbucks");
    }

    #[test]
    fn builtin_keywords_are_normalized() {
        let c = Classifier::builtin();
        for rule in c.rules() {
            for k in &rule.keywords {
                assert_eq!(k, &normalize(k), "keyword '{}' not normalized", k);
            }
        }
    }
}
