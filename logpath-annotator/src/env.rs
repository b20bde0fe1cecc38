use k8s_openapi::api::core::v1::Container;

/// The environment of one container as ordered `(name, value)` pairs.
///
/// Variables without a literal value (for example those using `valueFrom`)
/// are kept with an empty value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContainerEnvSnapshot {
    vars: Vec<(String, String)>,
}

impl ContainerEnvSnapshot {
    #[must_use]
    pub fn from_container(container: &Container) -> Self {
        container
            .env
            .iter()
            .flatten()
            .map(|var| (var.name.clone(), var.value.clone().unwrap_or_default()))
            .collect()
    }

    /// Values of every variable called `name`, in declaration order.
    /// Repeated variables are all returned.
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.vars.iter().filter(move |(var, _)| var == name).map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize { self.vars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.vars.is_empty() }
}

impl<N, V> FromIterator<(N, V)> for ContainerEnvSnapshot
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect() }
    }
}
