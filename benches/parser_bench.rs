//! Statblock parser throughput: legacy table documents and fenced YAML blocks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use steelforge::bestiary::{dedupe_monsters, parse_document, parse_legacy_document, Monster};

const LEGACY_MONSTER: &str = r#"###### Orc Skirmisher
| Humanoid, Orc | - | Level 2 | Horde Harrier | EV 4 |
|:-:|:-:|:-:|:-:|:-:|
| **1M**<br>Size | **7**<br>Speed | **15**<br>Stamina | **0**<br>Stability | **2**<br>Free Strike |
| **+2**<br>Might | **+1**<br>Agility | **0**<br>Reason | **0**<br>Intuition | **-1**<br>Presence |

> 🗡️ **Hit and Run (Signature Ability)**
>
> | **Melee, Strike, Weapon** | **Main action** |
> | ------------------------- | --------------: |
> | **📏 Melee 1**            | **🎯 One creature** |
>
> **Power Roll + 2:**
>
> - **≤11:** 3 damage
> - **12-16:** 5 damage
> - **17+:** 7 damage

> ⭐️ **Blood Frenzy**
>
> The orc gains an edge on strikes against bleeding creatures.

"#;

const YAML_MONSTER: &str = r#"~~~ds-statblock
name: Orc Skirmisher
ancestry: [Humanoid, Orc]
level: 2
roles: [Horde, Harrier]
ev: 4
size: 1M
speed: 7
stamina: 15
stability: 0
free_strike: 2
features:
  - name: Hit and Run
    icon: 🗡️
    ability_type: Signature Ability
    keywords: [Melee, Strike, Weapon]
    distance: Melee 1
    target: One creature
    effects:
      - roll: Power Roll + 2
        tier1: 3 damage
        tier2: 5 damage
        tier3: 7 damage
      - name: Effect
        effect: The orc shifts 1.
~~~

"#;

fn legacy_document(monsters: usize) -> String {
    (0..monsters)
        .map(|index| LEGACY_MONSTER.replace("Orc Skirmisher", &format!("Orc Skirmisher {index}")))
        .collect()
}

fn yaml_document(monsters: usize) -> String {
    (0..monsters)
        .map(|index| YAML_MONSTER.replace("Orc Skirmisher", &format!("Orc Skirmisher {index}")))
        .collect()
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    group.sample_size(50);

    let legacy = legacy_document(50);
    group.throughput(Throughput::Bytes(legacy.len() as u64));
    group.bench_function("legacy_50_monsters", |b| {
        b.iter(|| black_box(parse_legacy_document(black_box(&legacy), "bench.md")))
    });

    let yaml = yaml_document(50);
    group.throughput(Throughput::Bytes(yaml.len() as u64));
    group.bench_function("statblock_50_monsters", |b| {
        b.iter(|| black_box(parse_document(black_box(&yaml), "bench.md")))
    });

    group.finish();
}

fn bench_dedupe(c: &mut Criterion) {
    let mut parsed: Vec<Monster> = parse_legacy_document(&legacy_document(200), "a.md");
    parsed.extend(parse_document(&yaml_document(200), "b.md"));

    c.bench_function("dedupe_400_records", |b| {
        b.iter_batched(
            || parsed.clone(),
            |monsters| black_box(dedupe_monsters(monsters)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_parsers, bench_dedupe);
criterion_main!(benches);
