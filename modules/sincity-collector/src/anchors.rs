//! Fixed geographic anchors the collector searches around.
//!
//! Order matters: anchors are queried in this order, and a business surfaced
//! by several anchors is attributed to the first one. Summary rankings break
//! ties by the same order.

/// One named query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub area: String,
}

impl Anchor {
    pub fn new(name: &str, lat: f64, lng: f64, area: &str) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lng,
            area: area.to_string(),
        }
    }
}

/// Ordered, immutable list of anchors for one run.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Anchor> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Configured position of the anchor with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.anchors.iter().position(|a| a.name == name)
    }

    /// The 31 Las Vegas casino properties, major properties first.
    pub fn las_vegas_casinos() -> Self {
        Self::new(
            LAS_VEGAS_CASINOS
                .iter()
                .map(|&(name, lat, lng, area)| Anchor::new(name, lat, lng, area))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a AnchorSet {
    type Item = &'a Anchor;
    type IntoIter = std::slice::Iter<'a, Anchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.anchors.iter()
    }
}

const LAS_VEGAS_CASINOS: &[(&str, f64, f64, &str)] = &[
    // Major properties
    ("Caesars Palace", 36.1162, -115.1744, "Mid Strip"),
    ("Bellagio", 36.1127, -115.1765, "Mid Strip"),
    ("MGM Grand", 36.1024, -115.1698, "South Strip"),
    ("Aria Resort Casino", 36.1067, -115.1761, "Mid Strip"),
    // Popular properties
    ("The Venetian", 36.1212, -115.1697, "North Strip"),
    ("The Palazzo", 36.1242, -115.1697, "North Strip"),
    ("Wynn Las Vegas", 36.1278, -115.1657, "North Strip"),
    ("Encore", 36.1308, -115.1656, "North Strip"),
    ("The Cosmopolitan", 36.1095, -115.1742, "Mid Strip"),
    ("Mandalay Bay", 36.0909, -115.1743, "South Strip"),
    ("Paris Las Vegas", 36.1125, -115.1708, "Mid Strip"),
    ("Planet Hollywood", 36.1097, -115.1708, "Mid Strip"),
    ("Park MGM", 36.1028, -115.1709, "South Strip"),
    // Mid-size properties
    ("The LINQ Hotel", 36.1170, -115.1724, "Mid Strip"),
    ("Flamingo Las Vegas", 36.1176, -115.1720, "Mid Strip"),
    ("Harrahs Las Vegas", 36.1190, -115.1726, "Mid Strip"),
    ("Luxor", 36.0955, -115.1761, "South Strip"),
    ("New York-New York", 36.1021, -115.1740, "South Strip"),
    ("Excalibur", 36.0985, -115.1758, "South Strip"),
    ("Treasure Island", 36.1247, -115.1722, "North Strip"),
    ("The Mirage", 36.1212, -115.1742, "Mid Strip"),
    ("Ballys Las Vegas", 36.1131, -115.1693, "Mid Strip"),
    ("Rio All-Suite Hotel", 36.1172, -115.1736, "Off Strip West"),
    ("Circus Circus", 36.1368, -115.1643, "North Strip"),
    ("Tropicana Las Vegas", 36.1001, -115.1717, "South Strip"),
    ("SLS Las Vegas", 36.1444, -115.1548, "North Strip"),
    ("The Cromwell", 36.1146, -115.1728, "Mid Strip"),
    // Small casinos
    ("Casino Royale", 36.1185, -115.1726, "Mid Strip"),
    ("Ellis Island", 36.1161, -115.1618, "Off Strip East"),
    ("Stage Door Casino", 36.1143, -115.1488, "Off Strip East"),
    ("Tuscany Suites", 36.1287, -115.1559, "Off Strip East"),
];
