//! Scheme registration for one API version.
//!
//! Renders `zz_generated.api.register.go`, the machine-owned file that makes
//! a version's types known to the runtime scheme and wires every resource and
//! subresource into the API-resource table. Output depends only on the
//! metadata tree, so regenerating unchanged metadata is a no-op diff.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use kubeboot_core::{Error, GeneratedFile, Overwrite, Result};
use kubeboot_manifest::{ApiGroup, GroupVersion, Resource, Subresource};
use tracing::debug;

use crate::{
    CodeBuilder, GoImports,
    templates::{BUILDERS, META_V1, RUNTIME, header},
};

const TEMPLATE: &str = "register-template";

/// Name of the generated registration file inside the version package.
pub const REGISTER_FILE: &str = "zz_generated.api.register.go";

/// Imported only when a subresource needs a default REST wrapper.
pub const REST_IMPORT: &str = "k8s.io/apiserver/pkg/registry/rest";

/// The registration file for one group version.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    group: &'a ApiGroup,
    version: &'a GroupVersion,
    boilerplate: &'a str,
}

impl<'a> Registration<'a> {
    pub fn new(group: &'a ApiGroup, version: &'a GroupVersion, boilerplate: &'a str) -> Self {
        Self {
            group,
            version,
            boilerplate,
        }
    }

    /// Path of the file relative to the project root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from("pkg")
            .join("apis")
            .join(&self.group.name)
            .join(self.version.version.as_str())
            .join(REGISTER_FILE)
    }

    /// Imports the file needs. The REST import is appended only when some
    /// resource in the version declares a subresource.
    pub fn imports(&self) -> GoImports {
        let mut imports = GoImports::new();
        imports
            .add_as("metav1", META_V1)
            .add(RUNTIME)
            .add(BUILDERS)
            .add("k8s.io/apimachinery/pkg/runtime/schema")
            .add("k8s.io/apiserver/pkg/registry/generic")
            .add(self.group.package.as_str());
        if self.version.has_subresources() {
            imports.add(REST_IMPORT);
        }
        imports
    }

    /// Render the registration source.
    pub fn render(&self) -> Result<String> {
        self.check()?;
        debug!(
            group = %self.group.name,
            version = %self.version.version,
            resources = self.version.resources.len(),
            "rendering registration"
        );

        let builder = header(self.boilerplate)
            .line("// Code generated by kubeboot. DO NOT EDIT.")
            .blank()
            .line(&format!("package {}", self.version.version))
            .blank();

        let builder = self.imports().render(builder).blank();
        let builder = self.known_types(builder).blank();
        let builder = self.api_version(builder).blank();
        let builder = self.helpers(builder);

        let builder = self
            .version
            .resources
            .iter()
            .fold(builder, |b, resource| self.resource_types(b, resource));

        Ok(builder.build())
    }

    /// Reject metadata the templates cannot express.
    fn check(&self) -> Result<()> {
        let mut kinds = HashSet::new();
        for resource in &self.version.resources {
            if resource.kind.is_empty() {
                return Err(Error::render(TEMPLATE, "resource kind is empty"));
            }
            if resource.status_strategy.is_empty() {
                return Err(Error::render(
                    TEMPLATE,
                    format!("status strategy of '{}' is empty", resource.kind),
                ));
            }
            if !kinds.insert(resource.kind.as_str()) {
                return Err(Error::render(
                    TEMPLATE,
                    format!(
                        "kind '{}' is declared twice in {}",
                        resource.kind, self.version.version
                    ),
                ));
            }
            for sub in &resource.subresources {
                if sub.kind.is_empty() || sub.request.is_empty() {
                    return Err(Error::render(
                        TEMPLATE,
                        format!("subresource of '{}' needs a kind and a request", resource.kind),
                    ));
                }
            }
        }
        Ok(())
    }

    fn known_types(&self, b: CodeBuilder) -> CodeBuilder {
        b.block_with_close("func addKnownTypes(scheme *runtime.Scheme) error {", "}", |b| {
            b.line("scheme.AddKnownTypes(SchemeGroupVersion,")
                .indent()
                .each(&self.version.resources, |b, resource| {
                    b.line(&format!("&{}{{}},", resource.kind))
                        .line(&format!("&{}List{{}},", resource.kind))
                        .each(&resource.subresources, |b, sub| {
                            b.line(&format!("&{}{{}},", sub.request))
                                .line(&format!("&{}List{{}},", sub.request))
                        })
                })
                .dedent()
                .line(")")
                .line("return nil")
        })
    }

    fn api_version(&self, b: CodeBuilder) -> CodeBuilder {
        b.line("var (")
            .indent()
            .line(&format!(
                "ApiVersion = builders.NewApiVersion(\"{}\", \"{}\").WithResources(",
                self.group.qualified_name(),
                self.version.version
            ))
            .indent()
            .each(&self.version.resources, |b, resource| {
                let b = self.resource_entry(b, resource);
                resource
                    .subresources
                    .iter()
                    .fold(b, |b, sub| self.subresource_entry(b, resource, sub))
            })
            .dedent()
            .line(")")
            .blank()
            .comment("Required by code generated by go2idl")
            .line("AddToScheme = (&runtime.SchemeBuilder{")
            .indent()
            .line("ApiVersion.SchemeBuilder.AddToScheme,")
            .line("RegisterDefaults,")
            .line("RegisterConversions,")
            .line("addKnownTypes,")
            .block_with_close("func(scheme *runtime.Scheme) error {", "},", |b| {
                b.line("metav1.AddToGroupVersion(scheme, SchemeGroupVersion)")
                    .line("return nil")
            })
            .dedent()
            .line("}).AddToScheme")
            .blank()
            .line("SchemeBuilder = ApiVersion.SchemeBuilder")
            .line("localSchemeBuilder = SchemeBuilder")
            .line("SchemeGroupVersion = ApiVersion.GroupVersion")
            .dedent()
            .line(")")
    }

    /// A resource either uses its custom REST constructor or its default
    /// storage plus a status endpoint.
    fn resource_entry(&self, b: CodeBuilder, resource: &Resource) -> CodeBuilder {
        let group = &self.group.name;
        let kind = &resource.kind;
        match &resource.rest {
            Some(rest) => b.block_with_close("builders.NewApiResourceWithStorage(", "),", |b| {
                b.line(&format!("{}.Internal{},", group, kind))
                    .line(&format!(
                        "func() runtime.Object {{ return &{}{{}} }},     // Register versioned resource",
                        kind
                    ))
                    .line(&format!(
                        "func() runtime.Object {{ return &{}List{{}} }}, // Register versioned resource list",
                        kind
                    ))
                    .line(&format!("{}.New{},", group, rest))
            }),
            None => b
                .line(&format!("{}.{},", group, resource.storage_name(group)))
                .block_with_close(
                    "builders.NewApiResource( // Resource status endpoint",
                    "),",
                    |b| {
                        b.line(&format!("{}.Internal{}Status,", group, kind))
                            .line(&format!(
                                "func() runtime.Object {{ return &{}{{}} }},     // Register versioned resource",
                                kind
                            ))
                            .line(&format!(
                                "func() runtime.Object {{ return &{}List{{}} }}, // Register versioned resource list",
                                kind
                            ))
                            .line(&format!(
                                "&{}.{}{{builders.StatusStorageStrategySingleton}},",
                                group, resource.status_strategy
                            ))
                    },
                ),
        }
    }

    /// A subresource either uses its custom REST constructor or a default
    /// wrapper around the parent resource's storage.
    fn subresource_entry(
        &self,
        b: CodeBuilder,
        resource: &Resource,
        sub: &Subresource,
    ) -> CodeBuilder {
        let group = &self.group.name;
        let storage = match &sub.rest {
            Some(rest) => format!("{}.New{},", group, rest),
            None => format!(
                "func(generic.RESTOptionsGetter) rest.Storage {{ return &{}.{}REST{{{}.New{}Registry({}.{})}} }},",
                group,
                sub.kind,
                group,
                resource.kind,
                group,
                resource.storage_name(group)
            ),
        };
        b.block_with_close("builders.NewApiResourceWithStorage(", "),", |b| {
            b.line(&format!("{}.Internal{}REST,", group, sub.kind))
                .line(&format!(
                    "func() runtime.Object {{ return &{}{{}} }}, // Register versioned resource",
                    sub.request
                ))
                .line("nil,")
                .line(&storage)
        })
    }

    fn helpers(&self, b: CodeBuilder) -> CodeBuilder {
        b.comment("Required by code generated by go2idl")
            .comment("Kind takes an unqualified kind and returns a Group qualified GroupKind")
            .block_with_close("func Kind(kind string) schema.GroupKind {", "}", |b| {
                b.line("return SchemeGroupVersion.WithKind(kind).GroupKind()")
            })
            .blank()
            .comment("Required by code generated by go2idl")
            .comment("Resource takes an unqualified resource and returns a Group qualified GroupResource")
            .block_with_close("func Resource(resource string) schema.GroupResource {", "}", |b| {
                b.line("return SchemeGroupVersion.WithResource(resource).GroupResource()")
            })
    }

    fn resource_types(&self, b: CodeBuilder, resource: &Resource) -> CodeBuilder {
        let b = b
            .blank()
            .comment("")
            .comment(&format!("{} Functions and Structs", resource.kind))
            .comment("")
            .line("// +k8s:deepcopy-gen=false")
            .block_with_close(
                &format!("type {}SchemeFns struct {{", resource.kind),
                "}",
                |b| b.line("builders.DefaultSchemeFns"),
            )
            .blank();
        let b = list_type(b, &resource.kind);
        resource
            .subresources
            .iter()
            .fold(b, |b, sub| list_type(b.blank(), &sub.request))
    }
}

/// `<Name>List` wrapper registered next to every type.
fn list_type(b: CodeBuilder, name: &str) -> CodeBuilder {
    b.line("// +k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object")
        .block_with_close(&format!("type {}List struct {{", name), "}", |b| {
            b.line("metav1.TypeMeta `json:\",inline\"`")
                .line("metav1.ListMeta `json:\"metadata,omitempty\"`")
                .line(&format!("Items           []{} `json:\"items\"`", name))
        })
}

impl GeneratedFile for Registration<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.relative_path())
    }

    fn overwrite(&self) -> Overwrite {
        Overwrite::Always
    }

    fn render(&self) -> Result<String> {
        Registration::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(version: GroupVersion) -> ApiGroup {
        ApiGroup::new("apps", "example.com", "github.com/acme/widgets").version(version)
    }

    fn v1alpha1() -> GroupVersion {
        GroupVersion::new("v1alpha1".parse().unwrap())
    }

    #[test]
    fn test_relative_path() {
        let group = group(v1alpha1());
        let registration = Registration::new(&group, &group.versions[0], "");
        assert_eq!(
            registration.relative_path(),
            Path::new("pkg/apis/apps/v1alpha1/zz_generated.api.register.go")
        );
    }

    #[test]
    fn test_default_resource_wiring() {
        let group = group(v1alpha1().resource(Resource::new("Widget")));
        let code = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap();

        assert!(
            code.starts_with("// Code generated by kubeboot. DO NOT EDIT.\n\npackage v1alpha1\n")
        );
        assert!(code.contains(
            "\tApiVersion = builders.NewApiVersion(\"apps.example.com\", \"v1alpha1\").WithResources(\n\t\tapps.AppsWidgetStorage,\n"
        ));
        assert!(code.contains("\t\t\tapps.InternalWidgetStatus,\n"));
        assert!(code.contains(
            "\t\t\t&apps.WidgetStatusStrategy{builders.StatusStorageStrategySingleton},\n"
        ));
        assert!(!code.contains("NewApiResourceWithStorage"));
    }

    #[test]
    fn test_custom_rest_wiring() {
        let group = group(v1alpha1().resource(Resource::new("Widget").with_rest("WidgetREST")));
        let code = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap();

        assert!(code.contains("\t\t\tapps.InternalWidget,\n"));
        assert!(code.contains("\t\t\tapps.NewWidgetREST,\n"));
        assert!(!code.contains("AppsWidgetStorage"));
        assert!(!code.contains("StatusStorageStrategySingleton"));
    }

    #[test]
    fn test_subresource_wiring() {
        let group = group(
            v1alpha1().resource(
                Resource::new("Widget")
                    .subresource(Subresource::new("WidgetScale", "Scale"))
                    .subresource(Subresource::new("WidgetBind", "Binding").with_rest("BindREST")),
            ),
        );
        let code = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap();

        assert!(code.contains("\t\t\tapps.InternalWidgetScaleREST,\n"));
        assert!(code.contains(
            "\t\t\tfunc(generic.RESTOptionsGetter) rest.Storage { return &apps.WidgetScaleREST{apps.NewWidgetRegistry(apps.AppsWidgetStorage)} },\n"
        ));
        assert!(code.contains("\t\t\tapps.NewBindREST,\n"));
        assert!(code.contains("\t\t&Scale{},\n\t\t&ScaleList{},\n"));
        assert!(code.contains("type BindingList struct {\n"));
    }

    #[test]
    fn test_known_types() {
        let group = group(
            v1alpha1()
                .resource(Resource::new("Widget"))
                .resource(Resource::new("Gadget")),
        );
        let code = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap();

        assert!(code.contains(
            "func addKnownTypes(scheme *runtime.Scheme) error {\n\
             \tscheme.AddKnownTypes(SchemeGroupVersion,\n\
             \t\t&Widget{},\n\
             \t\t&WidgetList{},\n\
             \t\t&Gadget{},\n\
             \t\t&GadgetList{},\n\
             \t)\n\
             \treturn nil\n\
             }\n"
        ));
    }

    #[test]
    fn test_duplicate_kind_is_render_error() {
        let group = group(
            v1alpha1()
                .resource(Resource::new("Widget"))
                .resource(Resource::new("Widget")),
        );
        let err = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap_err();
        assert!(matches!(*err, Error::Render { .. }));
    }

    #[test]
    fn test_empty_request_is_render_error() {
        let widget = Resource::new("Widget").subresource(Subresource::new("WidgetScale", ""));
        let group = group(v1alpha1().resource(widget));
        let err = Registration::new(&group, &group.versions[0], "")
            .render()
            .unwrap_err();
        assert!(err.to_string().contains("needs a kind and a request"));
    }
}
