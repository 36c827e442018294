use serde::Serialize;

/// Reference entry in the hospital directory. Not stored; served as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u32,
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub specialties: &'static [&'static str],
    pub transplant_types: &'static [&'static str],
    /// Miles.
    pub distance: f64,
}

pub const HOSPITALS: &[Hospital] = &[
    Hospital {
        id: 1,
        name: "City General Hospital",
        address: "123 Main St, Cityville, ST 12345",
        phone: "(555) 123-4567",
        email: "contact@citygeneralhospital.org",
        specialties: &["Cardiac", "Renal", "Neurology"],
        transplant_types: &["Heart", "Kidney", "Liver"],
        distance: 2.5,
    },
    Hospital {
        id: 2,
        name: "Memorial Medical Center",
        address: "456 Park Ave, Townsburg, ST 12345",
        phone: "(555) 987-6543",
        email: "info@memorialmedical.org",
        specialties: &["Oncology", "Pediatrics", "Transplant"],
        transplant_types: &["Kidney", "Cornea", "Bone Marrow"],
        distance: 5.1,
    },
    Hospital {
        id: 3,
        name: "University Health System",
        address: "789 College Blvd, Academia, ST 12345",
        phone: "(555) 222-3333",
        email: "contact@universityhealthsystem.edu",
        specialties: &["Research", "Surgery", "Teaching"],
        transplant_types: &["Heart", "Lung", "Liver", "Kidney", "Pancreas"],
        distance: 8.7,
    },
    Hospital {
        id: 4,
        name: "Children's Specialty Hospital",
        address: "101 Pediatric Lane, Kidsville, ST 12345",
        phone: "(555) 444-5555",
        email: "care@childrensspecialty.org",
        specialties: &["Pediatric Surgery", "Neonatal", "Pediatric Oncology"],
        transplant_types: &["Kidney", "Bone Marrow", "Heart"],
        distance: 12.3,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(HOSPITALS).unwrap();
        let first = &json[0];
        assert_eq!(first["name"], "City General Hospital");
        assert_eq!(first["transplantTypes"][1], "Kidney");
        assert_eq!(first["distance"], 2.5);
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}
