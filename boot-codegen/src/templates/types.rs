use super::{BUILDER_TEST, CLIENT_REST, GINKGO, GOMEGA, META_V1, RUNTIME, header};
use crate::{GenerationPayload, GoImports};

/// Resource type definition with its validation and defaulting hooks.
pub(super) fn types_go(p: &GenerationPayload) -> String {
    let kind = p.kind();

    let mut imports = GoImports::new();
    imports.add("log");
    imports.section();
    imports
        .add(RUNTIME)
        .add("k8s.io/apiserver/pkg/endpoints/request");
    imports.section();
    imports
        .add_as("metav1", META_V1)
        .add("k8s.io/apimachinery/pkg/util/validation/field");
    imports.section();
    imports.add(p.group_package());

    let builder = header(p.boilerplate())
        .line(&format!("package {}", p.version()))
        .blank();

    imports
        .render(builder)
        .blank()
        .line("// +genclient=true")
        .blank()
        .comment(kind)
        .line("// +k8s:openapi-gen=true")
        .line(&format!(
            "// +resource:path={},strategy={}Strategy",
            p.resource(),
            kind
        ))
        .block_with_close(&format!("type {} struct {{", kind), "}", |b| {
            b.line("metav1.TypeMeta   `json:\",inline\"`")
                .line("metav1.ObjectMeta `json:\"metadata,omitempty\"`")
                .blank()
                .line(&format!("Spec   {}Spec   `json:\"spec,omitempty\"`", kind))
                .line(&format!("Status {}Status `json:\"status,omitempty\"`", kind))
        })
        .blank()
        .comment(&format!("{}Spec defines the desired state of {}", kind, kind))
        .line(&format!("type {}Spec struct {{", kind))
        .line("}")
        .blank()
        .comment(&format!("{}Status defines the observed state of {}", kind, kind))
        .line(&format!("type {}Status struct {{", kind))
        .line("}")
        .blank()
        .comment(&format!("Validate checks that an instance of {} is well formed", kind))
        .block_with_close(
            &format!(
                "func ({}Strategy) Validate(ctx request.Context, obj runtime.Object) field.ErrorList {{",
                kind
            ),
            "}",
            |b| {
                b.line(&format!("o := obj.(*{}.{})", p.group(), kind))
                    .line(&format!(
                        "log.Printf(\"Validating fields for {} %s\\n\", o.Name)",
                        kind
                    ))
                    .line("errors := field.ErrorList{}")
                    .comment("perform validation here and add to errors using field.Invalid")
                    .line("return errors")
            },
        )
        .blank()
        .comment(&format!("DefaultingFunction sets default {} field values", kind))
        .block_with_close(
            &format!("func ({}SchemeFns) DefaultingFunction(o interface{{}}) {{", kind),
            "}",
            |b| {
                b.line(&format!("obj := o.(*{})", kind))
                    .comment("set default field values here")
                    .line(&format!(
                        "log.Printf(\"Defaulting fields for {} %s\\n\", obj.Name)",
                        kind
                    ))
            },
        )
        .build()
}

/// Ginkgo suite bootstrapping a test API server for the version package.
pub(super) fn version_suite_test_go(p: &GenerationPayload) -> String {
    let mut imports = GoImports::new();
    imports.add("testing");
    imports.section();
    imports
        .add_as(".", GINKGO)
        .add_as(".", GOMEGA)
        .add(BUILDER_TEST)
        .add(CLIENT_REST);
    imports.section();
    imports
        .add(format!("{}/pkg/apis", p.repo()))
        .add(format!("{}/pkg/client/clientset_generated/clientset", p.repo()))
        .add(format!("{}/pkg/openapi", p.repo()));

    let builder = header(p.boilerplate())
        .line(&format!("package {}_test", p.version()))
        .blank();

    imports
        .render(builder)
        .blank()
        .line("var testenv *test.TestEnvironment")
        .line("var config *rest.Config")
        .line("var cs *clientset.Clientset")
        .blank()
        .block_with_close(
            &format!("func Test{}(t *testing.T) {{", p.version_title()),
            "}",
            |b| {
                b.line("RegisterFailHandler(Fail)").line(&format!(
                    "RunSpecsWithDefaultAndCustomReporters(t, \"{} Suite\", []Reporter{{test.NewlineReporter{{}}}})",
                    p.version()
                ))
            },
        )
        .blank()
        .block_with_close("var _ = BeforeSuite(func() {", "})", |b| {
            b.line("testenv = test.NewTestEnvironment()")
                .line("config = testenv.Start(apis.GetAllApiBuilders(), openapi.GetOpenAPIDefinitions)")
                .line("cs = clientset.NewForConfigOrDie(config)")
        })
        .blank()
        .block_with_close("var _ = AfterSuite(func() {", "})", |b| {
            b.line("testenv.Stop()")
        })
        .build()
}

/// CRUD round trip against the generated typed client.
pub(super) fn types_test_go(p: &GenerationPayload) -> String {
    let kind = p.kind();

    let mut imports = GoImports::new();
    imports.add_as(".", GINKGO).add_as(".", GOMEGA);
    imports.section();
    imports.add_as("metav1", META_V1);
    imports.section();
    imports.add_as(".", p.version_package()).add_as(
        ".",
        format!(
            "{}/pkg/client/clientset_generated/clientset/typed/{}/{}",
            p.repo(),
            p.group(),
            p.version()
        ),
    );

    let client = format!(
        "client = cs.{}{}Client.{}(\"{}-test-valid\")",
        p.group_title(),
        p.version_title(),
        p.pluralized_kind(),
        p.kind_lower()
    );

    let builder = header(p.boilerplate())
        .line(&format!("package {}_test", p.version()))
        .blank();

    imports
        .render(builder)
        .blank()
        .block_with_close(
            &format!("var _ = Describe(\"{}\", func() {{", kind),
            "})",
            |b| {
                b.line(&format!("var instance {}", kind))
                    .line(&format!("var expected {}", kind))
                    .line(&format!("var client {}Interface", kind))
                    .blank()
                    .block_with_close("BeforeEach(func() {", "})", |b| {
                        b.line(&format!("instance = {}{{}}", kind))
                            .line("instance.Name = \"instance-1\"")
                            .blank()
                            .line("expected = instance")
                    })
                    .blank()
                    .block_with_close("AfterEach(func() {", "})", |b| {
                        b.line("client.Delete(instance.Name, &metav1.DeleteOptions{})")
                    })
                    .blank()
                    .block_with_close(
                        "Describe(\"when sending a storage request\", func() {",
                        "})",
                        |b| {
                            b.block_with_close(
                                "Context(\"for a valid config\", func() {",
                                "})",
                                |b| {
                                    b.block_with_close(
                                        "It(\"should provide CRUD access to the object\", func() {",
                                        "})",
                                        |b| crud_steps(b.line(&client).blank()),
                                    )
                                },
                            )
                        },
                    )
            },
        )
        .build()
}

fn crud_steps(b: crate::CodeBuilder) -> crate::CodeBuilder {
    b.line("By(\"returning success from the create request\")")
        .line("actual, err := client.Create(&instance)")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .blank()
        .line("By(\"defaulting the expected fields\")")
        .line("Expect(actual.Spec).To(Equal(expected.Spec))")
        .blank()
        .line("By(\"returning the item for list requests\")")
        .line("result, err := client.List(metav1.ListOptions{})")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .line("Expect(result.Items).To(HaveLen(1))")
        .line("Expect(result.Items[0].Spec).To(Equal(expected.Spec))")
        .blank()
        .line("By(\"returning the item for get requests\")")
        .line("actual, err = client.Get(instance.Name, metav1.GetOptions{})")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .line("Expect(actual.Spec).To(Equal(expected.Spec))")
        .blank()
        .line("By(\"deleting the item for delete requests\")")
        .line("err = client.Delete(instance.Name, &metav1.DeleteOptions{})")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .line("result, err = client.List(metav1.ListOptions{})")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .line("Expect(result.Items).To(HaveLen(0))")
}
