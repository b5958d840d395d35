//! The closed set of resource templates.
//!
//! Each template is a typed render function from [`GenerationPayload`] to Go
//! source. [`TemplateId`] names them, knows where each artifact lives in the
//! project, and dispatches rendering.

mod controller;
mod doc;
mod types;

use std::path::PathBuf;

use kubeboot_core::{Result, to_lower_case};

use crate::{CodeBuilder, GenerationPayload};

pub use doc::{GroupDoc, VersionDoc};

pub(crate) const META_V1: &str = "k8s.io/apimachinery/pkg/apis/meta/v1";
pub(crate) const RUNTIME: &str = "k8s.io/apimachinery/pkg/runtime";
pub(crate) const BUILDERS: &str =
    "github.com/kubernetes-incubator/apiserver-builder-alpha/pkg/builders";
pub(crate) const BUILDER_CONTROLLER: &str =
    "github.com/kubernetes-incubator/apiserver-builder-alpha/pkg/controller";
pub(crate) const BUILDER_TEST: &str =
    "github.com/kubernetes-incubator/apiserver-builder-alpha/pkg/test";
pub(crate) const GINKGO: &str = "github.com/onsi/ginkgo";
pub(crate) const GOMEGA: &str = "github.com/onsi/gomega";
pub(crate) const CLIENT_REST: &str = "k8s.io/client-go/rest";

/// Identifies one template in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// `pkg/apis/<group>/doc.go`
    GroupDoc,
    /// `pkg/apis/<group>/<version>/doc.go`
    VersionDoc,
    /// `pkg/apis/<group>/<version>/<kind>_types.go`
    Types,
    /// `pkg/apis/<group>/<version>/<kind>_types_test.go`
    TypesTest,
    /// `pkg/apis/<group>/<version>/<version>_suite_test.go`
    VersionSuiteTest,
    /// `pkg/controller/<kind>/controller.go`
    Controller,
    /// `pkg/controller/<kind>/controller_test.go`
    ControllerTest,
    /// `pkg/controller/<kind>/<kind>_suite_test.go`
    ControllerSuiteTest,
}

impl TemplateId {
    /// The six artifacts created for every resource, in write order.
    pub const RESOURCE: [TemplateId; 6] = [
        TemplateId::Types,
        TemplateId::TypesTest,
        TemplateId::VersionSuiteTest,
        TemplateId::Controller,
        TemplateId::ControllerTest,
        TemplateId::ControllerSuiteTest,
    ];

    /// Stable template name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::GroupDoc => "group-template",
            TemplateId::VersionDoc => "version-template",
            TemplateId::Types => "resource-template",
            TemplateId::TypesTest => "resource-test-template",
            TemplateId::VersionSuiteTest => "version-suite-test-template",
            TemplateId::Controller => "resource-controller-template",
            TemplateId::ControllerTest => "controller-test-template",
            TemplateId::ControllerSuiteTest => "resource-controller-suite-test-template",
        }
    }

    /// Path of the artifact relative to the project root.
    pub fn relative_path(&self, payload: &GenerationPayload) -> PathBuf {
        let apis = PathBuf::from("pkg").join("apis").join(payload.group());
        let version = apis.join(payload.version().as_str());
        let controller = PathBuf::from("pkg")
            .join("controller")
            .join(payload.kind_lower());

        match self {
            TemplateId::GroupDoc => GroupDoc::from(payload).relative_path(),
            TemplateId::VersionDoc => VersionDoc::from(payload).relative_path(),
            TemplateId::Types => version.join(format!("{}_types.go", payload.kind_lower())),
            TemplateId::TypesTest => {
                version.join(format!("{}_types_test.go", payload.kind_lower()))
            }
            TemplateId::VersionSuiteTest => version.join(format!(
                "{}_suite_test.go",
                to_lower_case(payload.version().as_str())
            )),
            TemplateId::Controller => controller.join("controller.go"),
            TemplateId::ControllerTest => controller.join("controller_test.go"),
            TemplateId::ControllerSuiteTest => {
                controller.join(format!("{}_suite_test.go", payload.kind_lower()))
            }
        }
    }

    /// Render the template for `payload`.
    pub fn render(&self, payload: &GenerationPayload) -> Result<String> {
        payload.check(self.name())?;
        let code = match self {
            TemplateId::GroupDoc => GroupDoc::from(payload).to_source(),
            TemplateId::VersionDoc => VersionDoc::from(payload).to_source(),
            TemplateId::Types => types::types_go(payload),
            TemplateId::TypesTest => types::types_test_go(payload),
            TemplateId::VersionSuiteTest => types::version_suite_test_go(payload),
            TemplateId::Controller => controller::controller_go(payload),
            TemplateId::ControllerTest => controller::controller_test_go(payload),
            TemplateId::ControllerSuiteTest => controller::controller_suite_test_go(payload),
        };
        Ok(code)
    }
}

/// Start a file with the copyright header followed by a blank line.
pub(crate) fn header(boilerplate: &str) -> CodeBuilder {
    let boilerplate = boilerplate.trim();
    if boilerplate.is_empty() {
        return CodeBuilder::go();
    }
    CodeBuilder::go()
        .each(boilerplate.lines(), |b, line| b.line(line.trim_end()))
        .blank()
}
