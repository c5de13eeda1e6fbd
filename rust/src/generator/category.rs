//! Keyword rules for inferring a work category from an item name.

use crate::models::Category;

/// Ordered keyword rules; the first rule with a matching keyword wins.
///
/// Pruning precedes planting and lawn so that 樹木剪定 is pruning work.
/// Latin keywords are lowercase and matched against the lowercased name at
/// the start of a word.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Preparation,
        &["現場調査", "調査", "測量", "現調", "準備", "survey", "measur", "site visit"],
    ),
    (
        Category::Design,
        &["設計", "デザイン", "図面", "プラン", "design", "drawing", "layout"],
    ),
    (
        Category::Procurement,
        &["資材", "調達", "発注", "仕入", "material", "procure", "purchas"],
    ),
    (
        Category::Demolition,
        &["解体", "撤去", "取り壊し", "はつり", "demoli", "removal", "tear down"],
    ),
    (
        Category::Earthwork,
        &["土工", "掘削", "整地", "造成", "盛土", "客土", "残土", "excavat", "grading", "earthwork"],
    ),
    (
        Category::Foundation,
        &["基礎", "地業", "砕石", "foundation", "footing"],
    ),
    (
        Category::Plumbing,
        &["給排水", "配管", "散水", "灌水", "排水", "水栓", "irrigation", "plumbing", "drainage", "sprinkler"],
    ),
    (
        Category::Electrical,
        &["電気", "照明", "配線", "ライト", "electric", "lighting", "wiring"],
    ),
    (
        Category::Structures,
        &["フェンス", "デッキ", "門扉", "塀", "擁壁", "パーゴラ", "カーポート", "物置", "fence", "deck", "pergola", "retaining wall"],
    ),
    (
        Category::Paving,
        &["舗装", "敷石", "石張", "タイル", "砂利", "アプローチ", "コンクリート", "paving", "asphalt", "gravel", "tile"],
    ),
    (
        Category::Pruning,
        &["剪定", "刈込", "刈り込み", "伐採", "草刈", "prun", "trim", "mowing"],
    ),
    (
        Category::Planting,
        &["植栽", "植樹", "植え", "樹木", "花壇", "生垣", "planting", "tree", "shrub", "flower"],
    ),
    (
        Category::Lawn,
        &["芝", "lawn", "turf", "sod"],
    ),
    (
        Category::Finishing,
        &["仕上", "手直し", "養生", "finish", "touch-up", "touch up"],
    ),
    (
        Category::Cleaning,
        &["清掃", "掃除", "片付", "clean"],
    ),
    (
        Category::Disposal,
        &["処分", "廃棄", "産廃", "搬出", "disposal", "waste", "haul"],
    ),
];

/// Infer the category of a work item from its name.
///
/// Returns `Category::General` when no rule matches.
pub fn infer_category(name: &str) -> Category {
    let lowered = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| matches_keyword(&lowered, kw)))
        .map(|&(category, _)| category)
        .unwrap_or(Category::General)
}

/// Latin keywords must begin a word; other keywords match anywhere.
fn matches_keyword(name: &str, keyword: &str) -> bool {
    if !keyword.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return name.contains(keyword);
    }
    name.match_indices(keyword)
        .any(|(at, _)| !name[..at].ends_with(|c: char| c.is_ascii_alphanumeric()))
}
