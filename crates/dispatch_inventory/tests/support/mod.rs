#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Hydrant export as saved by a spreadsheet: BOM on the first header, one bad row.
pub const HYDRANTS_CSV: &str = "\u{feff}ADRESSE,JURIDICTION,PROPRIETAIRE,DATE_INSTALLATION,STATUT_ACTIF,ABANDONNE_R,ELEVATION_TERRAIN,COORDONNEE_SPATIALE_X,COORDONNEE_SPATIALE_Y,LATITUDE,LONGITUDE
100 rue Saint-Denis,Montréal,Ville,2004-06-01,Actif,Non,35.2,299000.1,5043000.2,45.5505,-73.58
102 rue Saint-Denis,Montréal,Ville,2004-06-01,Actif,Non,35.4,299000.1,5043055.2,45.5510,-73.58
104 rue Saint-Denis,Montréal,Ville,,Inactif,Oui,35.9,,,,
106 rue Saint-Denis,Montréal,Ville,2011-09-12,Actif,Non,36.0,299000.1,5043110.2,45.5515,-73.58
108 rue Saint-Denis,Montréal,Privé,2011-09-12,Actif,Non,36.1,299000.1,5043165.2,45.5520,-73.58
110 rue Saint-Denis,Montréal,Ville,2015-03-30,Actif,Non,36.3,299000.1,5043220.2,45.5525,-73.58
";

pub const STATIONS_CSV: &str = "CASERNE,NO_CIVIQUE,RUE,VILLE,ARRONDISSEMENT,DATE_DEBUT,DATE_FIN,LATITUDE,LONGITUDE
16,2915,avenue du Mont-Royal Est,Montréal,Le Plateau-Mont-Royal,1997-01-01,,45.5500,-73.5772
30,5100,boulevard Saint-Laurent,Montréal,Le Plateau-Mont-Royal,1997-01-01,,45.5500,-73.6080
99,1,rue Inconnue,Montréal,Ville-Marie,1997-01-01,2002-01-01,unknown,unknown
";

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}
