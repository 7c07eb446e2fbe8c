use pipegen_core::errors::{ErrorInfo, PipegenError};
use pipegen_core::{json_kind, RngHandle, SearchSpec};
use serde_json::{Map, Number, Value};

/// Source of concrete parameter assignments for random mode.
///
/// Every call must return an independent draw for the given spec.
pub trait ParameterSampler {
    /// Draws one concrete value for every parameter of `spec`.
    fn sample(&mut self, spec: &SearchSpec) -> Result<Map<String, Value>, PipegenError>;
}

impl<F> ParameterSampler for F
where
    F: FnMut(&SearchSpec) -> Result<Map<String, Value>, PipegenError>,
{
    fn sample(&mut self, spec: &SearchSpec) -> Result<Map<String, Value>, PipegenError> {
        self(spec)
    }
}

/// Parsed form of one search parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Value copied unchanged into every draw.
    Fixed(Value),
    /// Uniform choice among candidates (a plain list or `{"choice": [...]}`).
    Choice(Vec<Value>),
    /// `{"range": [low, high], "scale": "log", "discrete": true}`.
    Range {
        low: f64,
        high: f64,
        log: bool,
        discrete: bool,
    },
    /// `{"bool": true}`: fair coin.
    Bool,
}

impl Distribution {
    /// Parses the declared value of parameter `name`.
    pub fn parse(name: &str, value: &Value) -> Result<Self, PipegenError> {
        let spec = match value {
            Value::Array(values) => return non_empty_choice(name, values),
            Value::Object(spec) => spec,
            other => return Ok(Distribution::Fixed(other.clone())),
        };
        if let Some(choice) = spec.get("choice") {
            let Value::Array(values) = choice else {
                return Err(sampler_error(name, "invalid-choice", "'choice' must be a list"));
            };
            return non_empty_choice(name, values);
        }
        if let Some(range) = spec.get("range") {
            let bounds = range
                .as_array()
                .filter(|bounds| bounds.len() == 2)
                .and_then(|bounds| Some((bounds[0].as_f64()?, bounds[1].as_f64()?)));
            let Some((low, high)) = bounds else {
                return Err(sampler_error(
                    name,
                    "invalid-range",
                    "'range' must be a list of two numbers",
                ));
            };
            if low > high {
                return Err(sampler_error(
                    name,
                    "invalid-range",
                    "range lower bound exceeds upper bound",
                ));
            }
            let log = match spec.get("scale") {
                None => false,
                Some(Value::String(scale)) if scale == "log" => true,
                Some(Value::String(scale)) if scale == "linear" => false,
                Some(_) => {
                    return Err(sampler_error(
                        name,
                        "invalid-scale",
                        "'scale' must be 'log' or 'linear'",
                    ))
                }
            };
            if log && low <= 0.0 {
                return Err(sampler_error(
                    name,
                    "invalid-range",
                    "log-scaled ranges need a positive lower bound",
                ));
            }
            let discrete = spec
                .get("discrete")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            return Ok(Distribution::Range {
                low,
                high,
                log,
                discrete,
            });
        }
        if spec.get("bool").and_then(Value::as_bool) == Some(true) {
            return Ok(Distribution::Bool);
        }
        Err(PipegenError::Sampler(
            ErrorInfo::new(
                "unknown-distribution",
                "mapping does not describe a known distribution",
            )
            .with_context("parameter", name)
            .with_hint("use one of 'choice', 'range' or 'bool'"),
        ))
    }

    fn draw(&self, rng: &mut RngHandle) -> Result<Value, PipegenError> {
        match self {
            Distribution::Fixed(value) => Ok(value.clone()),
            Distribution::Choice(values) => rng
                .pick_index(values.len())
                .map(|idx| values[idx].clone())
                .ok_or_else(|| {
                    PipegenError::Sampler(ErrorInfo::new("empty-choice", "no candidates"))
                }),
            Distribution::Range {
                low,
                high,
                log,
                discrete,
            } => {
                let sample = if *log {
                    rng.uniform(low.ln(), high.ln()).exp()
                } else {
                    rng.uniform(*low, *high)
                };
                if *discrete {
                    Ok(Value::from(sample.round() as i64))
                } else {
                    Number::from_f64(sample).map(Value::Number).ok_or_else(|| {
                        PipegenError::Sampler(ErrorInfo::new(
                            "non-finite-sample",
                            "sampled value is not a finite number",
                        ))
                    })
                }
            }
            Distribution::Bool => Ok(Value::Bool(rng.coin())),
        }
    }
}

fn non_empty_choice(name: &str, values: &[Value]) -> Result<Distribution, PipegenError> {
    if values.is_empty() {
        Err(sampler_error(name, "empty-choice", "choice list is empty"))
    } else {
        Ok(Distribution::Choice(values.to_vec()))
    }
}

fn sampler_error(name: &str, code: &str, message: &str) -> PipegenError {
    PipegenError::Sampler(ErrorInfo::new(code, message).with_context("parameter", name))
}

/// Seeded sampler understanding lists, `choice`, `range` and `bool`
/// distributions. Scalars pass through unchanged.
#[derive(Debug, Clone)]
pub struct DistributionSampler {
    rng: RngHandle,
}

impl DistributionSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: RngHandle::from_seed(seed),
        }
    }
}

impl ParameterSampler for DistributionSampler {
    fn sample(&mut self, spec: &SearchSpec) -> Result<Map<String, Value>, PipegenError> {
        let mut assignment = Map::new();
        for (name, declared) in spec.params() {
            let value = Distribution::parse(name, declared)?.draw(&mut self.rng)?;
            tracing::trace!(parameter = %name, kind = json_kind(&value), "sampled parameter");
            assignment.insert(name.clone(), value);
        }
        Ok(assignment)
    }
}
