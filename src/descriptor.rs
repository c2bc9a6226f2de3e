use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    path::Path,
};

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, roles::Role};

/// Path parameters captured while matching, keyed by parameter name.
pub type PathParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Exact(String),
    Param(String),
}

/// PathPattern
///
/// A compiled route pattern. Segments are either literals or parameters
/// written `:name` or `{name}`. Empty segments are dropped, so `/orders/` and
/// `/orders` are the same pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

/// Ordering of two patterns that match the same path. Compared segment by
/// segment from the left, an exact segment outranks a parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(Vec<u8>);

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, String> {
        if !raw.starts_with('/') {
            return Err(format!("path `{raw}` must start with `/`"));
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for part in raw.split('/').filter(|part| !part.is_empty()) {
            let param = part
                .strip_prefix(':')
                .or_else(|| part.strip_prefix('{').and_then(|p| p.strip_suffix('}')));
            match param {
                Some("") => return Err(format!("path `{raw}` has an unnamed parameter")),
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(format!("path `{raw}` repeats parameter `{name}`"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Exact(part.to_string())),
            }
        }
        Ok(Self { segments })
    }

    /// Matches `path` and returns the captured parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let mut params = PathParams::new();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Exact(literal) if literal == part => {}
                Segment::Exact(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        // Extra trailing segments mean a different, deeper resource.
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(
            self.segments
                .iter()
                .map(|segment| match segment {
                    Segment::Exact(_) => 1,
                    Segment::Param(_) => 0,
                })
                .collect(),
        )
    }

    /// True when both patterns match exactly the same set of paths.
    fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Exact(a), Segment::Exact(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }
}

/// EndpointDescriptor
///
/// A static access rule: which roles may call `method path`, and which
/// entities the operation behind it touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub id: String,
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub allowed_roles: BTreeSet<Role>,
    pub entities: BTreeSet<String>,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

impl EndpointDescriptor {
    pub fn new(id: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            allowed_roles: BTreeSet::new(),
            entities: BTreeSet::new(),
        }
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles.extend(roles);
        self
    }

    pub fn entities<I, E>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.entities.extend(entities.into_iter().map(Into::into));
        self
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// On-disk form of a descriptor, as found in a route file.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorDef {
    pub id: String,
    pub method: String,
    pub path: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
}

impl TryFrom<DescriptorDef> for EndpointDescriptor {
    type Error = ApiError;

    fn try_from(def: DescriptorDef) -> Result<Self, Self::Error> {
        let method = Method::from_bytes(def.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ApiError::inconsistent(&def.id, format!("bad method `{}`", def.method)))?;
        let roles = def
            .roles
            .iter()
            .map(|name| {
                name.parse::<Role>()
                    .map_err(|_| ApiError::inconsistent(&def.id, format!("unknown role `{name}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EndpointDescriptor::new(def.id, method, def.path)
            .roles(roles)
            .entities(def.entities))
    }
}

struct CompiledEndpoint {
    descriptor: EndpointDescriptor,
    pattern: PathPattern,
}

/// RouteMatch
///
/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub descriptor: &'a EndpointDescriptor,
    pub params: PathParams,
}

/// DescriptorTable
///
/// The immutable endpoint table. Built once at startup, after which it is only
/// read, so it can be shared across request tasks without locking.
pub struct DescriptorTable {
    endpoints: Vec<CompiledEndpoint>,
    by_method: HashMap<Method, Vec<usize>>,
}

impl std::fmt::Debug for DescriptorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorTable")
            .field("endpoints", &self.endpoints.len())
            .finish()
    }
}

impl DescriptorTable {
    /// Compiles and audits `descriptors`. Registration order is preserved and
    /// breaks ties between equally specific matches.
    ///
    /// Fails with `InconsistentDescriptor` when a descriptor has no allowed
    /// role, an unparsable path, a duplicate id, or declares entities that no
    /// single allowed role may access.
    pub fn new(descriptors: Vec<EndpointDescriptor>) -> Result<Self, ApiError> {
        let mut endpoints: Vec<CompiledEndpoint> = Vec::with_capacity(descriptors.len());
        let mut by_method: HashMap<Method, Vec<usize>> = HashMap::new();
        let mut ids = HashSet::new();

        for descriptor in descriptors {
            if !ids.insert(descriptor.id.clone()) {
                return Err(ApiError::inconsistent(&descriptor.id, "duplicate descriptor id"));
            }
            if descriptor.allowed_roles.is_empty() {
                return Err(ApiError::inconsistent(&descriptor.id, "no allowed roles"));
            }
            let covered = descriptor.allowed_roles.iter().any(|role| {
                descriptor
                    .entities
                    .iter()
                    .all(|entity| role.may_access(entity))
            });
            if !covered {
                return Err(ApiError::inconsistent(
                    &descriptor.id,
                    "entities are not accessible to any allowed role",
                ));
            }
            let pattern = PathPattern::parse(&descriptor.path)
                .map_err(|reason| ApiError::inconsistent(&descriptor.id, reason))?;

            let slot = by_method.entry(descriptor.method.clone()).or_default();
            if let Some(&earlier) = slot
                .iter()
                .find(|&&index| endpoints[index].pattern.same_shape(&pattern))
            {
                tracing::warn!(
                    shadowed = %descriptor.id,
                    winner = %endpoints[earlier].descriptor.id,
                    "descriptor is shadowed by an earlier registration"
                );
            }
            slot.push(endpoints.len());
            endpoints.push(CompiledEndpoint {
                descriptor,
                pattern,
            });
        }

        Ok(Self {
            endpoints,
            by_method,
        })
    }

    /// Parses a JSON array of `DescriptorDef` and builds the table.
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        let defs: Vec<DescriptorDef> = serde_json::from_str(raw)
            .map_err(|e| ApiError::inconsistent("<route file>", e.to_string()))?;
        let descriptors = defs
            .into_iter()
            .map(EndpointDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(descriptors)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::inconsistent(path.display().to_string(), format!("unreadable: {e}"))
        })?;
        Self::from_json(&raw)
    }

    /// Finds the most specific descriptor for `method path`.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let candidates = self.by_method.get(method)?;

        let mut best: Option<(Specificity, usize, PathParams)> = None;
        for &index in candidates {
            let endpoint = &self.endpoints[index];
            let Some(params) = endpoint.pattern.matches(path) else {
                continue;
            };
            let specificity = endpoint.pattern.specificity();
            let better = match &best {
                None => true,
                // Strictly greater only: on a tie the earlier registration stays.
                Some((current, _, _)) => specificity.cmp(current) == Ordering::Greater,
            };
            if better {
                best = Some((specificity, index, params));
            }
        }

        best.map(|(_, index, params)| RouteMatch {
            descriptor: &self.endpoints[index].descriptor,
            params,
        })
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter().map(|endpoint| &endpoint.descriptor)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
