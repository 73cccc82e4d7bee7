use rusqlite::{params, Connection};

/// (code, name, area, area_land, area_water, population, growth, birth, death, migration)
type Row = (
    &'static str,
    &'static str,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
);

const ROWS: &[Row] = &[
    ("AFG", "Afghanistan", Some(652230), Some(652230), Some(0), Some(32564342), Some(2.32), Some(38.57), Some(13.89), Some(1.51)),
    ("ALB", "Albania", Some(28748), Some(27398), Some(1350), Some(3029278), Some(0.3), Some(12.92), Some(6.58), Some(3.3)),
    ("DZA", "Algeria", Some(2381741), Some(2381741), Some(0), Some(39542166), Some(1.84), Some(23.67), Some(4.31), Some(0.92)),
    ("AND", "Andorra", Some(468), Some(468), Some(0), Some(85580), Some(0.12), Some(8.13), Some(6.96), Some(0.0)),
    ("AGO", "Angola", Some(1246700), Some(1246700), Some(0), Some(19625353), Some(2.78), Some(38.78), Some(11.49), Some(0.46)),
    ("ARG", "Argentina", Some(2780400), Some(2736690), Some(43710), Some(43431886), Some(0.93), Some(16.64), Some(7.33), Some(0.0)),
    ("AUS", "Australia", Some(7741220), Some(7682300), Some(58920), Some(22751014), Some(1.07), Some(12.15), Some(7.14), Some(5.65)),
    ("BGD", "Bangladesh", Some(148460), Some(130170), Some(18290), Some(168957745), Some(1.6), Some(21.14), Some(5.61), Some(0.46)),
    ("BRA", "Brazil", Some(8515770), Some(8358140), Some(157630), Some(204259812), Some(0.77), Some(14.46), Some(6.58), Some(0.14)),
    ("BGR", "Bulgaria", Some(110879), Some(108489), Some(2390), Some(7186893), Some(-0.58), Some(8.92), Some(14.44), Some(0.29)),
    ("CAN", "Canada", Some(9984670), Some(9093507), Some(891163), Some(35099836), Some(0.75), Some(10.28), Some(8.42), Some(5.66)),
    ("CHN", "China", Some(9596960), Some(9326410), Some(270550), Some(1367485388), Some(0.45), Some(12.49), Some(7.53), Some(0.44)),
    ("EGY", "Egypt", Some(1001450), Some(995450), Some(6000), Some(88487396), Some(1.79), Some(22.9), Some(4.77), Some(0.17)),
    ("ETH", "Ethiopia", Some(1104300), Some(1000000), Some(104300), Some(99465819), Some(2.89), Some(37.27), Some(8.19), Some(0.22)),
    ("FRA", "France", Some(643801), Some(640427), Some(3374), Some(66553766), Some(0.43), Some(12.38), Some(9.16), Some(1.09)),
    ("DEU", "Germany", Some(357022), Some(348672), Some(8350), Some(80854408), Some(-0.17), Some(8.47), Some(11.42), Some(1.24)),
    ("IND", "India", Some(3287263), Some(2973193), Some(314070), Some(1251695584), Some(1.22), Some(19.55), Some(7.32), Some(0.04)),
    ("IDN", "Indonesia", Some(1904569), Some(1811569), Some(93000), Some(255993674), Some(0.92), Some(16.72), Some(6.37), Some(1.16)),
    ("JPN", "Japan", Some(377915), Some(364485), Some(13430), Some(126919659), Some(-0.16), Some(7.93), Some(9.51), Some(0.0)),
    ("LIE", "Liechtenstein", Some(160), Some(160), Some(0), Some(37624), Some(0.84), Some(10.5), Some(7.07), Some(5.0)),
    ("MCO", "Monaco", Some(2), Some(2), Some(0), Some(30535), Some(0.12), Some(6.65), Some(9.24), Some(3.83)),
    ("NER", "Niger", Some(1267000), Some(1266700), Some(300), Some(18045729), Some(3.25), Some(45.45), Some(12.42), Some(0.56)),
    ("NGA", "Nigeria", Some(923768), Some(910768), Some(13000), Some(181562056), Some(2.45), Some(37.64), Some(12.9), Some(0.22)),
    ("PAK", "Pakistan", Some(796095), Some(770875), Some(25220), Some(199085847), Some(1.46), Some(22.58), Some(6.49), Some(1.62)),
    ("RUS", "Russia", Some(17098242), Some(16377742), Some(720500), Some(142423773), Some(-0.04), Some(11.6), Some(13.69), Some(1.69)),
    ("USA", "United States", Some(9826675), Some(9161966), Some(664709), Some(321368864), Some(0.78), Some(12.49), Some(8.15), Some(3.86)),
    ("ATA", "Antarctica", Some(14000000), Some(14000000), Some(0), None, None, None, None, None),
    ("XPO", "Pacific Ocean", Some(155557000), None, None, None, None, None, None, None),
];

fn main() {
    let output_path = "factbook.db";
    let _ = std::fs::remove_file(output_path);
    let conn = Connection::open(output_path).expect("Failed to create output database");

    conn.execute_batch(
        "CREATE TABLE facts (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            code VARCHAR(255) NOT NULL,
            name VARCHAR(255) NOT NULL,
            area INTEGER,
            area_land INTEGER,
            area_water INTEGER,
            population INTEGER,
            population_growth FLOAT,
            birth_rate FLOAT,
            death_rate FLOAT,
            migration_rate FLOAT
        );",
    )
    .expect("Failed to create facts table");

    let mut stmt = conn
        .prepare(
            "INSERT INTO facts (code, name, area, area_land, area_water, population,
                                population_growth, birth_rate, death_rate, migration_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .expect("Failed to prepare insert");

    for row in ROWS {
        stmt.execute(params![row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7, row.8, row.9])
            .expect("Failed to insert row");
    }

    println!("Wrote {} rows to {output_path}", ROWS.len());
}
