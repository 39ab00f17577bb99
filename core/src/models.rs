use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Alternative feltnavn i prioritert rekkefølge (første ikke-tomme vinner)
pub const DATE_KEYS: &[&str] = &["start_date_local", "start_date"];
pub const WATTS_KEYS: &[&str] = &["average_watts", "avg_watts", "watts"];
pub const HEARTRATE_KEYS: &[&str] = &["average_heartrate", "average_hr", "avg_hr"];
pub const CADENCE_KEYS: &[&str] = &["average_cadence", "avg_cadence"];

/// Ett tidtatt forsøk på et segment, slik Strava leverer det.
///
/// Holdes som rått JSON-objekt: feltene kan mangle, ha feil type eller
/// dukke opp under flere navn, og ingenting her skal feile på det.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffortRecord(Map<String, Value>);

impl From<Map<String, Value>> for EffortRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for EffortRecord {
    type Error = Value;

    /// Kun JSON-objekter er gyldige efforts; alt annet leveres tilbake.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

/// "Tom" i samme forstand som en falsy verdi: null, false, 0, "", [] og {}.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Tekstform for nøkler og URL-er: strenger uten anførselstegn, tall som de står.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl EffortRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Første ikke-tomme verdi blant kandidatnøklene.
    pub fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !is_blank(v))
    }

    /// Første fire tegn av datoen; tom streng hvis datoen mangler eller er for kort.
    pub fn year(&self) -> String {
        let date = self.first_present(DATE_KEYS).map(value_text).unwrap_or_default();
        if date.chars().count() >= 4 {
            date.chars().take(4).collect()
        } else {
            String::new()
        }
    }

    /// `segment.id`, så `segment_id`, så konfigurert default.
    pub fn segment_id(&self, default_segment_id: &str) -> String {
        let nested = self
            .0
            .get("segment")
            .and_then(Value::as_object)
            .and_then(|s| s.get("id"))
            .filter(|v| !is_blank(v));
        let flat = self.0.get("segment_id").filter(|v| !is_blank(v));

        nested
            .or(flat)
            .map(value_text)
            .unwrap_or_else(|| default_segment_id.to_string())
    }

    /// Sammenligningsnøkkel for tid: manglende/ikke-numerisk => +inf.
    pub fn elapsed_seconds(&self) -> OrderedFloat<f64> {
        let parsed = match self.0.get("elapsed_time") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(x) if !x.is_nan() => OrderedFloat(x),
            _ => OrderedFloat(f64::INFINITY),
        }
    }

    pub fn effort_id(&self) -> Option<String> {
        self.0.get("id").filter(|v| !is_blank(v)).map(value_text)
    }
}

/// Én ferdig rad for regnearket: åtte tekstfelt i fast rekkefølge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub year: String,
    pub segment: String,
    pub navn: String,
    pub elapsed: String,
    pub effort_url: String,
    pub avg_watts: String,
    pub avg_bpm: String,
    pub avg_cadence: String,
}

impl SheetRow {
    pub fn columns(&self) -> [&str; 8] {
        [
            self.year.as_str(),
            self.segment.as_str(),
            self.navn.as_str(),
            self.elapsed.as_str(),
            self.effort_url.as_str(),
            self.avg_watts.as_str(),
            self.avg_bpm.as_str(),
            self.avg_cadence.as_str(),
        ]
    }

    /// Tab-separert, uten avsluttende skilletegn.
    pub fn to_tsv_line(&self) -> String {
        self.columns().join("\t")
    }
}
