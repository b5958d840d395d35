use super::{BUILDER_CONTROLLER, BUILDER_TEST, CLIENT_REST, GINKGO, GOMEGA, META_V1, header};
use crate::{GenerationPayload, GoImports};

/// Controller stub wired to the shared informer for the resource.
pub(super) fn controller_go(p: &GenerationPayload) -> String {
    let kind = p.kind();
    let version = p.version();

    let mut imports = GoImports::new();
    imports.add("log");
    imports.section();
    imports
        .add(BUILDER_CONTROLLER)
        .add(CLIENT_REST)
        .add("k8s.io/client-go/tools/cache")
        .add("k8s.io/client-go/util/workqueue");
    imports.section();
    imports
        .add(p.version_package())
        .add(format!("{}/pkg/controller/sharedinformers", p.repo()))
        .add_as(
            "listers",
            format!(
                "{}/pkg/client/listers_generated/{}/{}",
                p.repo(),
                p.group(),
                version
            ),
        );

    let builder = header(p.boilerplate())
        .line(&format!("package {}", p.kind_lower()))
        .blank();

    imports
        .render(builder)
        .blank()
        .line(&format!(
            "// +controller:group={},version={},kind={},resource={}",
            p.group(),
            version,
            kind,
            p.resource()
        ))
        .block_with_close(&format!("type {}ControllerImpl struct {{", kind), "}", |b| {
            b.comment(&format!("informer listens for events about {}", kind))
                .line("informer cache.SharedIndexInformer")
                .blank()
                .comment(&format!("lister indexes properties about {}", kind))
                .line(&format!("lister listers.{}Lister", kind))
        })
        .blank()
        .comment("Init initializes the controller and is called by the generated code")
        .comment("Registers eventhandlers to enqueue events")
        .comment("config - client configuration for talking to the apiserver")
        .comment("si - informer factory shared across all controllers for listening to events and indexing resource properties")
        .comment("queue - message queue for handling new events.  unique to this controller.")
        .line(&format!("func (c *{}ControllerImpl) Init(", kind))
        .indent()
        .line("config *rest.Config,")
        .line("si *sharedinformers.SharedInformers,")
        .line("queue workqueue.RateLimitingInterface) {")
        .blank()
        .comment(&format!(
            "Set the informer and lister for subscribing to events and indexing {} labels",
            p.resource()
        ))
        .line(&format!(
            "i := si.Factory.{}().{}().{}()",
            p.group_title(),
            p.version_title(),
            p.pluralized_kind()
        ))
        .line("c.informer = i.Informer()")
        .line("c.lister = i.Lister()")
        .blank()
        .comment(&format!(
            "Add an event handler to enqueue a message for {} adds / updates",
            p.resource()
        ))
        .line("c.informer.AddEventHandler(&controller.QueueingEventHandler{queue})")
        .dedent()
        .line("}")
        .blank()
        .comment("Reconcile handles enqueued messages")
        .block_with_close(
            &format!(
                "func (c *{}ControllerImpl) Reconcile(u *{}.{}) error {{",
                kind, version, kind
            ),
            "}",
            |b| {
                b.comment("Implement controller logic here")
                    .line(&format!(
                        "log.Printf(\"Running reconcile {} for %s\\n\", u.Name)",
                        kind
                    ))
                    .line("return nil")
            },
        )
        .blank()
        .block_with_close(
            &format!(
                "func (c *{}ControllerImpl) Get(namespace, name string) (*{}.{}, error) {{",
                kind, version, kind
            ),
            "}",
            |b| {
                b.line(&format!(
                    "return c.lister.{}(namespace).Get(name)",
                    p.resource_title()
                ))
            },
        )
        .build()
}

/// Ginkgo suite starting a test API server and the controller under test.
pub(super) fn controller_suite_test_go(p: &GenerationPayload) -> String {
    let kind = p.kind();
    let package = p.kind_lower();

    let mut imports = GoImports::new();
    imports.add("testing");
    imports.section();
    imports
        .add_as(".", GINKGO)
        .add_as(".", GOMEGA)
        .add(CLIENT_REST)
        .add(BUILDER_TEST);
    imports.section();
    imports
        .add(format!("{}/pkg/apis", p.repo()))
        .add(format!("{}/pkg/client/clientset_generated/clientset", p.repo()))
        .add(format!("{}/pkg/openapi", p.repo()))
        .add(format!("{}/pkg/controller/sharedinformers", p.repo()))
        .add(format!("{}/pkg/controller/{}", p.repo(), package));

    let builder = header(p.boilerplate())
        .line(&format!("package {}_test", package))
        .blank();

    imports
        .render(builder)
        .blank()
        .line("var testenv *test.TestEnvironment")
        .line("var config *rest.Config")
        .line("var cs *clientset.Clientset")
        .line("var shutdown chan struct{}")
        .line(&format!("var controller *{}.{}Controller", package, kind))
        .line("var si *sharedinformers.SharedInformers")
        .blank()
        .block_with_close(&format!("func Test{}(t *testing.T) {{", kind), "}", |b| {
            b.line("RegisterFailHandler(Fail)").line(&format!(
                "RunSpecsWithDefaultAndCustomReporters(t, \"{} Suite\", []Reporter{{test.NewlineReporter{{}}}})",
                kind
            ))
        })
        .blank()
        .block_with_close("var _ = BeforeSuite(func() {", "})", |b| {
            b.line("testenv = test.NewTestEnvironment()")
                .line("config = testenv.Start(apis.GetAllApiBuilders(), openapi.GetOpenAPIDefinitions)")
                .line("cs = clientset.NewForConfigOrDie(config)")
                .blank()
                .line("shutdown = make(chan struct{})")
                .line("si = sharedinformers.NewSharedInformers(config, shutdown)")
                .line(&format!(
                    "controller = {}.New{}Controller(config, si)",
                    package, kind
                ))
                .line("controller.Run(shutdown)")
        })
        .blank()
        .block_with_close("var _ = AfterSuite(func() {", "})", |b| {
            b.line("close(shutdown)").line("testenv.Stop()")
        })
        .build()
}

/// Verifies a created object reaches the reconcile loop.
pub(super) fn controller_test_go(p: &GenerationPayload) -> String {
    let kind = p.kind();
    let namespace = format!("{}-controller-test-handler", p.kind_lower());
    let client = format!(
        "client = cs.{}{}Client.{}(\"{}\")",
        p.group_title(),
        p.version_title(),
        p.pluralized_kind(),
        namespace
    );

    let mut imports = GoImports::new();
    imports.add("time");
    imports.section();
    imports
        .add_as(".", p.version_package())
        .add_as(
            ".",
            format!(
                "{}/pkg/client/clientset_generated/clientset/typed/{}/{}",
                p.repo(),
                p.group(),
                p.version()
            ),
        )
        .add_as(".", GINKGO)
        .add_as(".", GOMEGA);
    imports.section();
    imports.add_as("metav1", META_V1);

    let builder = header(p.boilerplate())
        .line(&format!("package {}_test", p.kind_lower()))
        .blank();

    imports
        .render(builder)
        .blank()
        .block_with_close(
            &format!("var _ = Describe(\"{} controller\", func() {{", kind),
            "})",
            |b| {
                b.line(&format!("var instance {}", kind))
                    .line("var expectedKey string")
                    .line(&format!("var client {}Interface", kind))
                    .line("var before chan struct{}")
                    .line("var after chan struct{}")
                    .blank()
                    .block_with_close("BeforeEach(func() {", "})", |b| {
                        b.line(&format!("instance = {}{{}}", kind))
                            .line("instance.Name = \"instance-1\"")
                            .line(&format!("expectedKey = \"{}/instance-1\"", namespace))
                    })
                    .blank()
                    .block_with_close("AfterEach(func() {", "})", |b| {
                        b.line("client.Delete(instance.Name, &metav1.DeleteOptions{})")
                    })
                    .blank()
                    .block_with_close(
                        "Describe(\"when creating a new object\", func() {",
                        "})",
                        |b| {
                            b.block_with_close(
                                "It(\"invoke the reconcile method\", func() {",
                                "})",
                                |b| reconcile_steps(b.line(&client)),
                            )
                        },
                    )
            },
        )
        .build()
}

fn reconcile_steps(b: crate::CodeBuilder) -> crate::CodeBuilder {
    b.line("before = make(chan struct{})")
        .line("after = make(chan struct{})")
        .blank()
        .line("actualKey := \"\"")
        .line("var actualErr error = nil")
        .blank()
        .comment("Setup test callbacks to be called when the message is reconciled")
        .block_with_close("controller.BeforeReconcile = func(key string) {", "}", |b| {
            b.line("defer close(before)").line("actualKey = key")
        })
        .block_with_close(
            "controller.AfterReconcile = func(key string, err error) {",
            "}",
            |b| {
                b.line("defer close(after)")
                    .line("actualKey = key")
                    .line("actualErr = err")
            },
        )
        .blank()
        .comment("Create an instance")
        .line("_, err := client.Create(&instance)")
        .line("Expect(err).ShouldNot(HaveOccurred())")
        .blank()
        .comment("Verify reconcile function is called against the correct key")
        .each(
            [("before", "reconcile never called"), ("after", "reconcile never finished")],
            |b, (channel, failure)| {
                b.line("select {")
                    .line(&format!("case <-{}:", channel))
                    .indent()
                    .line("Expect(actualKey).To(Equal(expectedKey))")
                    .line("Expect(actualErr).ShouldNot(HaveOccurred())")
                    .dedent()
                    .line("case <-time.After(time.Second * 2):")
                    .indent()
                    .line(&format!("Fail(\"{}\")", failure))
                    .dedent()
                    .line("}")
            },
        )
}
