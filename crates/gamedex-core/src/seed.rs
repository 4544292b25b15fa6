use crate::model::{Game, GameName, Language};

type SeedRow = (&'static str, &'static str, &'static [(Language, &'static str)]);

const SEED: &[SeedRow] = &[
    (
        "UNCHARTED4",
        "ADVENTURE",
        &[
            (Language::En, "Uncharted 4: A Thief's End"),
            (Language::Ko, "언차티드 4: 해적왕과 최후의 보물"),
            (Language::Ja, "アンチャーテッド 海賊王と最後の秘宝"),
        ],
    ),
    (
        "LOSTARK",
        "RPG",
        &[
            (Language::En, "Lost Ark"),
            (Language::Ko, "로스트아크"),
            (Language::Ja, "ロストアーク"),
        ],
    ),
    (
        "EPICSEVEN",
        "RPG",
        &[
            (Language::En, "Epic Seven"),
            (Language::Ko, "에픽세븐"),
            (Language::Ja, "エピックセブン"),
        ],
    ),
    (
        "CROSSFIRE",
        "FPS",
        &[
            (Language::En, "Crossfire"),
            (Language::Ko, "크로스파이어"),
            (Language::Ja, "クロスファイア"),
        ],
    ),
    (
        "TALESRUNNER",
        "RACING",
        &[
            (Language::En, "Tales Runner"),
            (Language::Ko, "테일즈런너"),
            (Language::Ja, "テイルズランナー"),
        ],
    ),
    (
        "SOULWORKER",
        "ADVENTURE",
        &[
            (Language::En, "Soulworker"),
            (Language::Ko, "소울워커"),
            (Language::Ja, "ソウルワーカー"),
        ],
    ),
    (
        "SKUL",
        "ROGUELITE",
        &[
            (Language::En, "Skul: The Hero Slayer"),
            (Language::Ko, "스컬: 더 히어로 슬레이어"),
            (Language::Ja, "Skul: The Hero Slayer"),
        ],
    ),
    (
        "GUILTYGEARSTRIVE",
        "FIGHTING",
        &[
            (Language::En, "Guilty Gear -Strive-"),
            (Language::Ko, "길티기어 -스트라이브-"),
            (Language::Ja, "ギルティギア −ストライヴ−"),
        ],
    ),
    (
        "LOBOTOMYCORP",
        "SIMULATION",
        &[
            (Language::En, "Lobotomy Corporation"),
            (Language::Ko, "로보토미 코퍼레이션"),
            (Language::Ja, "ロボトミーコーポレーション"),
        ],
    ),
    (
        "DJMAXRESPECTV",
        "RHYTHM",
        &[
            (Language::En, "DJMAX RESPECT V"),
            (Language::Ko, "디제이맥스 리스펙트 V"),
            (Language::Ja, "DJMAX RESPECT V"),
        ],
    ),
    (
        "LIBRARYOFRUINA",
        "STRATEGY",
        &[
            (Language::En, "Library Of Ruina"),
            (Language::Ko, "라이브러리 오브 루이나"),
            (Language::Ja, "ライブラリー・オブ・ルイナ"),
        ],
    ),
    ("RIICHICITY", "STRATEGY", &[(Language::En, "Riichi City")]),
];

/// The built-in sample catalog served when no data file can be read.
pub fn seed_games() -> Vec<Game> {
    SEED.iter()
        .map(|(id, category, names)| Game {
            id: (*id).to_string(),
            category: (*category).to_string(),
            name: names
                .iter()
                .map(|(lang, value)| GameName::new(*lang, *value))
                .collect(),
        })
        .collect()
}
