//! A miniature copy of the data directory for tests

use super::{files, Datasets};
use std::path::Path;
use tempfile::TempDir;

fn square(x: f64, y: f64, size: f64) -> String {
    format!(
        r#"{{"type":"Polygon","coordinates":[[[{x0},{y0}],[{x1},{y0}],[{x1},{y1}],[{x0},{y1}],[{x0},{y0}]]]}}"#,
        x0 = x,
        y0 = y,
        x1 = x + size,
        y1 = y + size
    )
}

fn collection(features: &[String]) -> String {
    format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
}

fn polygon_feature(properties: &str, geometry: String) -> String {
    format!(r#"{{"type":"Feature","properties":{},"geometry":{}}}"#, properties, geometry)
}

fn point_feature(x: f64, y: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"Point","coordinates":[{},{}]}}}}"#,
        x, y
    )
}

const ADDIS_STAKEHOLDERS: &str = "\
Organization,Primary sector ,Area of Activity (Food Systems Value Chain),Scale of Activity,Website
Harvest Co,Private,Production,Local,http://harvest.example
GreenAid,NGO,Distribution,National,none
FarmNet,Private,Production,National,https://farmnet.example
Missing Inc,Public,,Local,http://missing.example
City Bureau,Public,Consumption,Local,--
";

const HANOI_STAKEHOLDERS: &str = "\
Organization,Primary sector,Area of Activity,Scale of Activity,Website
Red River Rice,Private,Production,Regional,https://rrr.example
Hanoi Markets Board,Public,Distribution,Local,--
";

const SUPPLY: &str = "\
Year,province,Target,Supply to Hanoi,Target_1,Rice supply
2022,Thai Binh,Hanoi,100,Hanoi urban,60
2022,Thai Binh,Hanoi,100,Hanoi rural,40
2022,Nam Dinh,Hanoi,50,Hanoi urban,30
2022,Nam Dinh,Hanoi,50,Hanoi rural,20
2020,Thai Binh,Hanoi,80,Hanoi urban,80
";

const LCA: &str = "\
Food Group,Item Cd,Total GHG Emissions,Freshwater Comsumption (l),Acidification (kg SO2eq),Eutrophication (kg PO43-eq)
Cereals,Wheat,1.0,10,0.001,0.002
Cereals,Maize,2.0,20,0.002,0.004
Pulses,Lentils,3.0,30,0.003,0.006
Meat,Beef,10.0,100,0.010,0.020
";

const POLICIES: &str = "\
Unnamed: 0,Policy,Year,Sector
0,Food and Nutrition Strategy,2021,Health
1,Urban Agriculture Directive,2019,Agriculture
";

const SDG_INDICATORS: &str = "\
Dimensions,Components,Indicators,SDG impact area/target,SDG_1,SDG_2,SDG_3,SDG_4,SDG_5
Social,Health,Child stunting,Nutrition,2.2,3.1,,,
Environment,Water,Water use,Water,6.4,12.3,,,
Economic,Income,Food vendor wages,Work,8.5,,,,
";

const HANOI_AFFORDABILITY: &str = "\
Cat,Reg,Year,value
riceAfford,Urban,2018,3.1
riceAfford,Rural,2018,5.2
riceAfford,Urban,2020,2.9
riceAfford,Rural,2020,4.8
foodExp_totalExp,Urban,2018,38
";

const HANOI_HEALTH: &str = "\
Cat,Reg,Year,value
Stunting,Urban,2015,10.5
Stunting,Rural,2015,18.2
Stunting,Urban,2020,8.1
Anaemia,Urban,2020,21
";

const HANOI_DIET: &str = "\
Cat,Year,value
Rice,2013,320
Rice,2023,280
Meat,2013,60
Meat,2023,95
Fruit,2023,40
";

/// A populated data directory and the datasets loaded from it
pub struct Fixture {
    dir: TempDir,
    pub datasets: Datasets,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        write_data_dir(dir.path());
        let datasets = Datasets::load(dir.path()).unwrap();
        Self { dir, datasets }
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Write every input file into `dir`
pub fn write_data_dir(dir: &Path) {
    let write = |name: &str, contents: &str| std::fs::write(dir.join(name), contents).unwrap();

    write(
        files::ADDIS_MPI_GEOMETRY,
        &collection(&[
            polygon_feature(r#"{"Dist_Name":"Bole","MPI":20.5}"#, square(38.76, 8.98, 0.04)),
            polygon_feature(r#"{"Dist_Name":"Yeka","MPI":"41.0"}"#, square(38.80, 9.02, 0.04)),
        ]),
    );
    write(
        files::ADDIS_MPI_LONG,
        "Dist_Name,Variable,Value\nBole,Nutrition,12.5\nYeka,Nutrition,30.0\nBole,Water,5.0\nYeka,Water,9.5\n",
    );
    write(files::ADDIS_STAKEHOLDERS, ADDIS_STAKEHOLDERS);
    write(
        files::ADDIS_FOOD_ENV,
        &collection(&[
            polygon_feature(
                r#"{"Dist_Name":"Bole","ratio_obesogenic":1.8,"density_healthyout":4.2,"pct_access_healthy":61}"#,
                square(38.76, 8.98, 0.04),
            ),
            polygon_feature(
                r#"{"Dist_Name":"Yeka","ratio_obesogenic":0.9,"density_healthyout":2.1,"pct_access_healthy":48}"#,
                square(38.80, 9.02, 0.04),
            ),
        ]),
    );
    write(files::ADDIS_POLICIES, POLICIES);
    write(files::ADDIS_SDG_INDICATORS, SDG_INDICATORS);
    write(files::ADDIS_LCA, LCA);

    let addis_outlets = dir.join(files::ADDIS_OUTLETS_DIR);
    std::fs::create_dir_all(&addis_outlets).unwrap();
    std::fs::write(
        addis_outlets.join("addis_supermarkets_2024.geojson"),
        collection(&[point_feature(38.77, 8.99), point_feature(38.81, 9.03)]),
    )
    .unwrap();
    std::fs::write(
        addis_outlets.join("addis_street_food_vendors.geojson"),
        collection(&[point_feature(38.78, 9.0)]),
    )
    .unwrap();

    write(
        files::HANOI_MPI_GEOMETRY,
        &collection(&[
            polygon_feature(r#"{"Dist_Name":"Ba Dinh","Normalized":"0.2"}"#, square(105.80, 21.02, 0.04)),
            polygon_feature(r#"{"Dist_Name":"Hoan Kiem","Normalized":0.6}"#, square(105.84, 21.0, 0.04)),
        ]),
    );
    write(
        files::HANOI_MPI_LONG,
        "Dist_Name,Variable,Value\nBa Dinh,Income,0.1\nHoan Kiem,Income,0.4\n",
    );
    write(files::HANOI_STAKEHOLDERS, HANOI_STAKEHOLDERS);
    write(files::HANOI_AFFORDABILITY, HANOI_AFFORDABILITY);
    write(files::HANOI_HEALTH, HANOI_HEALTH);
    write(files::HANOI_DIET, HANOI_DIET);

    let hanoi_outlets = dir.join(files::HANOI_OUTLETS_DIR);
    std::fs::create_dir_all(&hanoi_outlets).unwrap();
    std::fs::write(
        hanoi_outlets.join("hanoi_wet_markets_2023.geojson"),
        collection(&[point_feature(105.82, 21.03)]),
    )
    .unwrap();

    write(files::SUPPLY, SUPPLY);
}
